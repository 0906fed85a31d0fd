//! Composes one AEYE.NG icon: background, eye glyph, wordmark, accents.

use image::{Rgba, RgbaImage};

use crate::gradient::{fill_radial, fill_vertical};
use crate::layout::{Ellipse, EyeLayout, Layout};
use crate::raster::{draw_hline, fill_ellipse, round_corners};
use crate::style::{Background, LogoStyle, Palette};
use crate::text::{Face, FontSet};

/// Axis-aligned pixel box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x as f32 + self.width as f32 / 2.0
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Bounds {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }
}

impl From<Ellipse> for Bounds {
    fn from(e: Ellipse) -> Self {
        Bounds {
            x: e.cx - e.rx,
            y: e.cy - e.ry,
            width: e.rx * 2 + 1,
            height: e.ry * 2 + 1,
        }
    }
}

/// Where the composer put things on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Composition {
    pub eye: Bounds,
    pub title: Bounds,
    pub subtitle: Bounds,
}

impl Composition {
    /// Box around the eye and both text lines.
    pub fn glyph_bounds(&self) -> Bounds {
        self.eye.union(&self.title).union(&self.subtitle)
    }
}

pub struct Logo {
    pub image: RgbaImage,
    pub composition: Composition,
}

/// Render a complete `size`×`size` icon.
pub fn render_logo(size: u32, maskable: bool, style: &LogoStyle, fonts: &FontSet) -> Logo {
    let mut image = RgbaImage::new(size, size);
    paint_background(&mut image, style, maskable);
    let composition = compose(&mut image, style, fonts, maskable);
    Logo { image, composition }
}

/// Fill the canvas with the style's gradient. Non-maskable icons of styles
/// with rounded corners get their corners cut; maskable ones stay full bleed
/// because the platform applies its own mask.
pub fn paint_background(canvas: &mut RgbaImage, style: &LogoStyle, maskable: bool) {
    match &style.background {
        Background::Radial { stops, ring_step } => fill_radial(canvas, stops, *ring_step),
        Background::Vertical { stops } => fill_vertical(canvas, stops),
    }

    if style.rounded_corners && !maskable {
        let radius = canvas.width().min(canvas.height()) / 8;
        round_corners(canvas, radius);
    }
}

/// Draw the eye, the two wordmark lines and the accent lines centered on
/// `canvas`.
pub fn compose(canvas: &mut RgbaImage, style: &LogoStyle, fonts: &FontSet, maskable: bool) -> Composition {
    let layout = Layout::compute(style, canvas.width(), maskable);
    let palette = &style.palette;

    draw_eye(canvas, &layout.eye, palette);

    let title = TextPass {
        face: &fonts.title,
        text: style.title,
        px: layout.title_px,
        color: palette.title,
        shadow: Some((layout.title_shadow, palette.title_shadow)),
        outline: layout.outline.then_some(palette.outline),
    }
    .draw_centered(canvas, layout.center_x, layout.title_y);

    let subtitle = TextPass {
        face: &fonts.subtitle,
        text: style.subtitle,
        px: layout.subtitle_px,
        color: palette.subtitle,
        shadow: None,
        outline: None,
    }
    .draw_centered(canvas, layout.center_x, layout.subtitle_y);

    for line in &layout.accents {
        let color = Rgba([palette.rule[0], palette.rule[1], palette.rule[2], line.alpha]);
        draw_hline(canvas, line.x0, line.x1, line.y, line.width, color);
    }

    Composition {
        eye: layout.eye.outer.into(),
        title,
        subtitle,
    }
}

fn draw_eye(canvas: &mut RgbaImage, eye: &EyeLayout, palette: &Palette) {
    let mut paint = |e: &Ellipse, color: Rgba<u8>| fill_ellipse(canvas, e.cx, e.cy, e.rx, e.ry, color);

    if let Some(shadow) = &eye.shadow {
        paint(shadow, palette.eye_shadow);
    }
    paint(&eye.outer, palette.accent);
    paint(&eye.iris, palette.iris);
    paint(&eye.pupil, palette.pupil);
    paint(&eye.highlight, palette.highlight);
}

struct TextPass<'a> {
    face: &'a Face,
    text: &'a str,
    px: u32,
    color: Rgba<u8>,
    shadow: Option<((i32, i32), Rgba<u8>)>,
    outline: Option<Rgba<u8>>,
}

impl TextPass<'_> {
    fn draw_centered(&self, canvas: &mut RgbaImage, center_x: i32, y: i32) -> Bounds {
        let extent = self.face.measure(self.text, self.px);
        let x = center_x - extent.width / 2;
        let stamp = |canvas: &mut RgbaImage, dx: i32, dy: i32, color: Rgba<u8>| {
            self.face.draw(canvas, self.text, self.px, x + dx, y + dy, color)
        };

        if let Some(((dx, dy), color)) = self.shadow {
            stamp(canvas, dx, dy, color);
        }
        stamp(canvas, 0, 0, self.color);

        if let Some(outline) = self.outline {
            for dx in -1..=1 {
                for dy in -1..=1 {
                    if dx != 0 || dy != 0 {
                        stamp(canvas, dx, dy, outline);
                    }
                }
            }
            stamp(canvas, 0, 0, self.color);
        }

        Bounds {
            x,
            y,
            width: extent.width,
            height: extent.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_union_covers_both() {
        let a = Bounds { x: 0, y: 0, width: 10, height: 5 };
        let b = Bounds { x: 5, y: -2, width: 10, height: 3 };
        assert_eq!(a.union(&b), Bounds { x: 0, y: -2, width: 15, height: 7 });
    }

    #[test]
    fn eye_layers_are_painted_front_to_back() {
        let style = LogoStyle::classic();
        let logo = render_logo(256, false, &style, &FontSet::builtin());
        let layout = Layout::compute(&style, 256, false);

        let pupil = layout.eye.pupil;
        let iris_edge = (pupil.cx - pupil.rx - 2, pupil.cy);
        assert_eq!(*logo.image.get_pixel(pupil.cx as u32, (pupil.cy + pupil.rx - 1) as u32), style.palette.pupil);
        assert_eq!(*logo.image.get_pixel(iris_edge.0 as u32, iris_edge.1 as u32), style.palette.iris);
    }

    #[test]
    fn professional_full_size_has_rounded_corners_but_maskable_does_not() {
        let style = LogoStyle::professional();
        let fonts = FontSet::builtin();
        assert_eq!(render_logo(128, false, &style, &fonts).image.get_pixel(0, 0)[3], 0);
        assert_eq!(render_logo(128, true, &style, &fonts).image.get_pixel(0, 0)[3], 255);
    }
}
