//! Size-proportional geometry of the eye glyph, wordmark and accent lines.
//!
//! Every measure is a fraction of the canvas size, truncated to whole pixels,
//! so the same glyph scales from a 16px favicon to a 1024px store icon.

use crate::style::{LogoStyle, Variant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ellipse {
    pub cx: i32,
    pub cy: i32,
    pub rx: i32,
    pub ry: i32,
}

impl Ellipse {
    fn circle(cx: i32, cy: i32, r: i32) -> Self {
        Self { cx, cy, rx: r, ry: r }
    }
}

/// Layers of the eye, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EyeLayout {
    pub shadow: Option<Ellipse>,
    pub outer: Ellipse,
    pub iris: Ellipse,
    pub pupil: Ellipse,
    pub highlight: Ellipse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccentLine {
    pub x0: i32,
    pub x1: i32,
    pub y: i32,
    pub width: i32,
    pub alpha: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub center_x: i32,
    pub eye: EyeLayout,
    pub title_y: i32,
    pub subtitle_y: i32,
    pub title_px: u32,
    pub subtitle_px: u32,
    /// Offset of the translucent copy drawn under the title.
    pub title_shadow: (i32, i32),
    /// Stamp a one-pixel outline around the title.
    pub outline: bool,
    pub accents: Vec<AccentLine>,
}

fn frac(value: f64, fraction: f64) -> i32 {
    (value * fraction) as i32
}

impl Layout {
    pub fn compute(style: &LogoStyle, size: u32, maskable: bool) -> Self {
        match style.variant {
            Variant::Classic => classic(size, maskable, style.safe_zone as f64),
            Variant::Professional => professional(size, maskable),
        }
    }
}

fn classic(size: u32, maskable: bool, safe_zone: f64) -> Layout {
    let s = size as f64;
    let center_x = (size / 2) as i32;

    let (eye_y, title_y, subtitle_y, rx, ry, title_px, subtitle_px) = if maskable {
        // Everything is laid out against the shrunken content box.
        let content = frac(s, safe_zone) as f64;
        (
            center_x - frac(content, 0.15),
            center_x + frac(content, 0.05),
            center_x + frac(content, 0.25),
            frac(content, 0.12),
            frac(content, 0.07),
            frac(content, 0.12).max(12),
            frac(content, 0.07).max(8),
        )
    } else {
        (
            frac(s, 0.37),
            frac(s, 0.55),
            frac(s, 0.65),
            frac(s, 0.14),
            frac(s, 0.08),
            frac(s, 0.14).max(12),
            frac(s, 0.08).max(8),
        )
    };

    let pupil = frac(rx as f64, 0.18).max(3);
    let highlight = frac(pupil as f64, 0.4).max(2);
    let nudge = frac(pupil as f64, 0.3);

    let eye = EyeLayout {
        shadow: None,
        outer: Ellipse { cx: center_x, cy: eye_y, rx, ry },
        iris: Ellipse {
            cx: center_x,
            cy: eye_y,
            rx: frac(rx as f64, 0.65),
            ry: frac(ry as f64, 0.65),
        },
        pupil: Ellipse::circle(center_x, eye_y, pupil),
        highlight: Ellipse::circle(center_x + nudge, eye_y - nudge, highlight),
    };

    let shadow = frac(s, 0.003).max(1);

    let accents = if size >= 128 && !maskable {
        vec![
            AccentLine {
                x0: frac(s, 0.29),
                x1: frac(s, 0.71),
                y: frac(s, 0.73),
                width: frac(s, 0.002).max(1),
                alpha: 150,
            },
            AccentLine {
                x0: frac(s, 0.34),
                x1: frac(s, 0.66),
                y: frac(s, 0.76),
                width: frac(s, 0.001).max(1),
                alpha: 100,
            },
        ]
    } else {
        Vec::new()
    };

    Layout {
        center_x,
        eye,
        title_y,
        subtitle_y,
        title_px: title_px as u32,
        subtitle_px: subtitle_px as u32,
        title_shadow: (shadow, shadow * 2),
        outline: false,
        accents,
    }
}

fn professional(size: u32, maskable: bool) -> Layout {
    let s = size as f64;
    let center_x = (size / 2) as i32;
    let cx = center_x as f64;

    let (eye_y, title_y, subtitle_y, title_px, subtitle_px) = if maskable {
        (
            frac(cx, 0.75),
            frac(cx, 1.15),
            frac(cx, 1.35),
            frac(s, 0.08).max(16),
            frac(s, 0.045).max(12),
        )
    } else {
        (
            frac(s, 0.35),
            frac(s, 0.58),
            frac(s, 0.72),
            frac(s, 0.12).max(16),
            frac(s, 0.065).max(10),
        )
    };

    let eye_width = frac(s, if maskable { 0.2 } else { 0.25 });
    let eye_height = frac(eye_width as f64, 0.6);
    let iris_width = frac(eye_width as f64, 0.7);
    let iris_height = frac(eye_height as f64, 0.7);
    let pupil = frac(iris_width as f64, 0.35);
    let highlight = frac(pupil as f64, 0.4);
    let nudge = frac(pupil as f64, 0.25);
    let drop = ((size / 200) as i32).max(2);

    let outer = Ellipse {
        cx: center_x,
        cy: eye_y,
        rx: eye_width / 2,
        ry: eye_height / 2,
    };
    let eye = EyeLayout {
        shadow: Some(Ellipse {
            cx: center_x + drop,
            cy: eye_y + drop,
            ..outer
        }),
        outer,
        iris: Ellipse {
            cx: center_x,
            cy: eye_y,
            rx: iris_width / 2,
            ry: iris_height / 2,
        },
        pupil: Ellipse::circle(center_x, eye_y, pupil / 2),
        highlight: Ellipse::circle(center_x + nudge, eye_y - nudge, highlight / 2),
    };

    let shadow = ((size / 300) as i32).max(1);

    let accents = if size >= 128 {
        let y = frac(s, if maskable { 0.85 } else { 0.82 });
        let half = frac(s, if maskable { 0.4 } else { 0.5 }) / 2;
        (0..3)
            .map(|i| AccentLine {
                x0: center_x - half,
                x1: center_x + half,
                y: y + i,
                width: 1,
                alpha: (80 - i * 20) as u8,
            })
            .collect()
    } else {
        Vec::new()
    };

    Layout {
        center_x,
        eye,
        title_y,
        subtitle_y,
        title_px: title_px as u32,
        subtitle_px: subtitle_px as u32,
        title_shadow: (shadow, shadow),
        outline: size >= 256,
        accents,
    }
}
