//! Visual presets for the two icon styles.
//!
//! A [`LogoStyle`] bundles everything a render pass needs besides the canvas
//! size: which layout rules to follow, the gradient, the palette and the font
//! candidates. Nothing here is global; callers build a style and pass it in.

use std::path::PathBuf;
use std::str::FromStr;

use image::Rgba;

use crate::gradient::GradientStops;

/// Layout family. Each variant has its own proportions, see [`crate::layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Radial navy background, gold eye and gold wordmark.
    Classic,
    /// Vertical blue background with rounded corners, white wordmark.
    Professional,
}

#[derive(Debug, Clone)]
pub enum Background {
    /// Concentric disks from the first stop (rim) to the last stop (center).
    Radial { stops: GradientStops, ring_step: usize },
    /// One solid color per row.
    Vertical { stops: GradientStops },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: Rgba<u8>,
    pub iris: Rgba<u8>,
    pub pupil: Rgba<u8>,
    pub highlight: Rgba<u8>,
    pub eye_shadow: Rgba<u8>,
    pub title: Rgba<u8>,
    pub title_shadow: Rgba<u8>,
    pub outline: Rgba<u8>,
    pub subtitle: Rgba<u8>,
    /// Color of the accent lines; the alpha of each line comes from the layout.
    pub rule: Rgba<u8>,
}

#[derive(Debug, Clone)]
pub struct LogoStyle {
    pub name: &'static str,
    pub variant: Variant,
    pub background: Background,
    pub palette: Palette,
    /// Fraction of the canvas left for content on maskable icons.
    pub safe_zone: f32,
    /// Round the canvas corners (radius size/8) on non-maskable icons.
    pub rounded_corners: bool,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub title_fonts: Vec<PathBuf>,
    pub subtitle_fonts: Vec<PathBuf>,
}

const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Rgba<u8> {
    Rgba([r, g, b, a])
}

fn paths(candidates: &[&str]) -> Vec<PathBuf> {
    candidates.iter().map(PathBuf::from).collect()
}

impl LogoStyle {
    /// Radial navy background with a gold eye and wordmark.
    pub fn classic() -> Self {
        Self {
            name: "classic",
            variant: Variant::Classic,
            background: Background::Radial {
                stops: GradientStops::two(rgba(26, 54, 93, 255), rgba(15, 23, 42, 255)),
                ring_step: 2,
            },
            palette: Palette {
                accent: rgba(255, 215, 0, 230),
                iris: rgba(15, 23, 42, 255),
                pupil: rgba(255, 215, 0, 255),
                highlight: rgba(255, 255, 255, 200),
                eye_shadow: rgba(0, 0, 0, 0),
                title: rgba(255, 215, 0, 255),
                title_shadow: rgba(0, 0, 0, 100),
                outline: rgba(0, 0, 0, 0),
                subtitle: rgba(148, 163, 184, 230),
                rule: rgba(55, 65, 81, 255),
            },
            safe_zone: 0.6,
            rounded_corners: false,
            title: "AEYE",
            subtitle: ".NG",
            title_fonts: paths(&[
                "/System/Library/Fonts/Helvetica.ttc",
                "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
            ]),
            subtitle_fonts: paths(&[
                "/System/Library/Fonts/Helvetica.ttc",
                "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
                "/usr/share/fonts/truetype/liberation/LiberationSans.ttf",
            ]),
        }
    }

    /// Vertical blue background, gold eye with a black pupil, white wordmark.
    pub fn professional() -> Self {
        let fonts = paths(&[
            "/System/Library/Fonts/SF-Pro-Display-Bold.otf",
            "/System/Library/Fonts/Helvetica.ttc",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
        ]);
        Self {
            name: "professional",
            variant: Variant::Professional,
            background: Background::Vertical {
                stops: GradientStops::three(
                    rgba(59, 130, 246, 255),
                    rgba(37, 99, 235, 255),
                    rgba(30, 64, 175, 255),
                ),
            },
            palette: Palette {
                accent: rgba(255, 193, 7, 255),
                iris: rgba(20, 30, 60, 255),
                pupil: rgba(0, 0, 0, 255),
                highlight: rgba(255, 255, 255, 200),
                eye_shadow: rgba(0, 0, 0, 40),
                title: rgba(255, 255, 255, 255),
                title_shadow: rgba(0, 0, 0, 120),
                outline: rgba(0, 0, 0, 60),
                subtitle: rgba(255, 255, 255, 200),
                rule: rgba(255, 255, 255, 255),
            },
            safe_zone: 0.8,
            rounded_corners: true,
            title: "AEYE",
            subtitle: ".NG",
            title_fonts: fonts.clone(),
            subtitle_fonts: fonts,
        }
    }

    /// Put extra font candidates ahead of the preset lists.
    pub fn with_fonts(mut self, preferred: &[PathBuf]) -> Self {
        for list in [&mut self.title_fonts, &mut self.subtitle_fonts] {
            let mut merged = preferred.to_vec();
            merged.append(list);
            *list = merged;
        }
        self
    }

    /// Swap the gold accent for `accent`. Pupil and title follow when they
    /// were drawn in the same gold.
    pub fn with_accent(mut self, accent: Rgba<u8>) -> Self {
        let opaque = |c: Rgba<u8>| Rgba([c[0], c[1], c[2], 255]);
        let keep_alpha = |c: Rgba<u8>| Rgba([accent[0], accent[1], accent[2], c[3]]);
        let gold = opaque(self.palette.accent);

        if opaque(self.palette.pupil) == gold {
            self.palette.pupil = keep_alpha(self.palette.pupil);
        }
        if opaque(self.palette.title) == gold {
            self.palette.title = keep_alpha(self.palette.title);
        }
        self.palette.accent = keep_alpha(self.palette.accent);
        self
    }
}

/// Parse a CSS color (`#fff`, `rgb(…)`, named colors) into an opaque pixel.
pub fn parse_css_color(value: &str) -> Option<Rgba<u8>> {
    css_color::Srgb::from_str(value).ok().map(|color| {
        Rgba([
            (color.red * 255.) as u8,
            (color.green * 255.) as u8,
            (color.blue * 255.) as u8,
            255,
        ])
    })
}
