//! Font resolution, text measurement and text drawing.
//!
//! A [`Face`] is either a TrueType/OpenType font loaded from disk through
//! `rusttype`, or the built-in 5x7 bitmap face that is always available.

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use rusttype::{point, Font, PositionedGlyph, Scale};

use crate::error::{Error, Result};
use crate::raster::blend_pixel;

#[derive(Clone)]
pub enum Face {
    Outline { font: Font<'static>, source: PathBuf },
    Builtin,
}

impl std::fmt::Debug for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Face::Outline { source, .. } => f.debug_tuple("Outline").field(source).finish(),
            Face::Builtin => f.write_str("Builtin"),
        }
    }
}

/// Measured ink box of a run of text, relative to the drawing origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextExtent {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Face {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|source| Error::FontRead {
            path: path.to_path_buf(),
            source,
        })?;
        let font = Font::try_from_vec(data).ok_or_else(|| Error::FontParse(path.to_path_buf()))?;
        Ok(Face::Outline {
            font,
            source: path.to_path_buf(),
        })
    }

    /// Try each candidate in order and return the first one that loads, or
    /// the built-in face when none does.
    pub fn resolve<P: AsRef<Path>>(candidates: &[P]) -> Self {
        for candidate in candidates {
            match Face::load(candidate.as_ref()) {
                Ok(face) => {
                    tracing::debug!(font = %candidate.as_ref().display(), "resolved font");
                    return face;
                }
                Err(err) => tracing::debug!("skipping font candidate: {err}"),
            }
        }
        tracing::warn!("no font candidate could be loaded, using the built-in bitmap face");
        Face::Builtin
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Face::Builtin)
    }

    /// Measure `text` at `px` pixels. The ink bounding box is preferred; text
    /// with no visible ink (spaces, unknown glyphs) falls back to the advance
    /// width so callers always get a usable extent.
    pub fn measure(&self, text: &str, px: u32) -> TextExtent {
        self.ink_extent(text, px)
            .unwrap_or_else(|| self.advance_extent(text, px))
    }

    fn ink_extent(&self, text: &str, px: u32) -> Option<TextExtent> {
        match self {
            Face::Outline { font, .. } => {
                let glyphs = layout(font, text, px);
                let mut boxes = glyphs.iter().filter_map(|g| g.pixel_bounding_box());
                let first = boxes.next()?;
                let (min_x, min_y, max_x, max_y) = boxes.fold(
                    (first.min.x, first.min.y, first.max.x, first.max.y),
                    |(x0, y0, x1, y1), bb| {
                        (x0.min(bb.min.x), y0.min(bb.min.y), x1.max(bb.max.x), y1.max(bb.max.y))
                    },
                );
                Some(TextExtent {
                    left: min_x,
                    top: min_y,
                    width: max_x - min_x,
                    height: max_y - min_y,
                })
            }
            Face::Builtin => bitmap::ink_extent(text, bitmap::scale_for(px)),
        }
    }

    fn advance_extent(&self, text: &str, px: u32) -> TextExtent {
        match self {
            Face::Outline { font, .. } => {
                let scale = Scale::uniform(px as f32);
                let v_metrics = font.v_metrics(scale);
                let width = layout(font, text, px)
                    .last()
                    .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
                    .unwrap_or(0.0);
                TextExtent {
                    left: 0,
                    top: 0,
                    width: width.ceil() as i32,
                    height: (v_metrics.ascent - v_metrics.descent).ceil() as i32,
                }
            }
            Face::Builtin => bitmap::advance_extent(text, bitmap::scale_for(px)),
        }
    }

    /// Draw `text` so that its measured ink box starts at `(x, y)`.
    pub fn draw(&self, img: &mut RgbaImage, text: &str, px: u32, x: i32, y: i32, color: Rgba<u8>) {
        let extent = self.measure(text, px);
        let origin_x = x - extent.left;
        let origin_y = y - extent.top;

        match self {
            Face::Outline { font, .. } => {
                for glyph in layout(font, text, px) {
                    if let Some(bb) = glyph.pixel_bounding_box() {
                        glyph.draw(|gx, gy, coverage| {
                            blend_pixel(
                                img,
                                origin_x + bb.min.x + gx as i32,
                                origin_y + bb.min.y + gy as i32,
                                color,
                                coverage,
                            );
                        });
                    }
                }
            }
            Face::Builtin => {
                bitmap::draw(img, text, bitmap::scale_for(px), origin_x, origin_y, color)
            }
        }
    }
}

fn layout(font: &Font<'static>, text: &str, px: u32) -> Vec<PositionedGlyph<'static>> {
    let scale = Scale::uniform(px as f32);
    let ascent = font.v_metrics(scale).ascent;
    font.layout(text, scale, point(0.0, ascent)).collect()
}

/// Title and subtitle faces for one render run.
#[derive(Debug, Clone)]
pub struct FontSet {
    pub title: Face,
    pub subtitle: Face,
}

impl FontSet {
    pub fn resolve<P: AsRef<Path>>(title: &[P], subtitle: &[P]) -> Self {
        Self {
            title: Face::resolve(title),
            subtitle: Face::resolve(subtitle),
        }
    }

    pub fn builtin() -> Self {
        Self {
            title: Face::Builtin,
            subtitle: Face::Builtin,
        }
    }
}

mod bitmap {
    use image::{Rgba, RgbaImage};

    use super::TextExtent;
    use crate::raster::blend_pixel;

    const GLYPH_W: i32 = 5;
    const GLYPH_H: i32 = 7;
    const ADVANCE: i32 = GLYPH_W + 1;

    /// Cell multiplier so the 7-row glyphs roughly track the requested size.
    pub fn scale_for(px: u32) -> i32 {
        (px as i32 / 8).max(1)
    }

    // Rows top to bottom, bit 4 is the leftmost column.
    fn rows(c: char) -> Option<[u8; 7]> {
        let rows = match c.to_ascii_uppercase() {
            'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
            'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
            'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
            'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
            'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
            'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
            'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
            'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
            'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
            'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
            'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
            'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
            'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
            'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
            'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
            'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
            'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
            'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
            'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
            'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
            'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
            'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
            'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
            'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
            'Y' => [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04],
            'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
            '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
            '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
            '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
            '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
            '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
            '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
            '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
            '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
            '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
            '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
            '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
            '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
            _ => return None,
        };
        Some(rows)
    }

    fn inked_columns(rows: &[u8; 7]) -> Option<(i32, i32)> {
        let mask = rows.iter().fold(0u8, |acc, r| acc | r);
        if mask == 0 {
            return None;
        }
        let first = (0..GLYPH_W).find(|&col| mask & (0x10 >> col) != 0)?;
        let last = (0..GLYPH_W).rev().find(|&col| mask & (0x10 >> col) != 0)?;
        Some((first, last))
    }

    fn inked_rows(rows: &[u8; 7]) -> Option<(i32, i32)> {
        let first = (0..GLYPH_H).find(|&r| rows[r as usize] != 0)?;
        let last = (0..GLYPH_H).rev().find(|&r| rows[r as usize] != 0)?;
        Some((first, last))
    }

    pub fn ink_extent(text: &str, scale: i32) -> Option<TextExtent> {
        let mut bounds: Option<(i32, i32, i32, i32)> = None;
        for (i, c) in text.chars().enumerate() {
            let Some(glyph_rows) = rows(c) else { continue };
            let (Some((c0, c1)), Some((r0, r1))) = (inked_columns(&glyph_rows), inked_rows(&glyph_rows)) else {
                continue;
            };
            let cell_x = i as i32 * ADVANCE;
            let glyph = (cell_x + c0, r0, cell_x + c1 + 1, r1 + 1);
            bounds = Some(match bounds {
                None => glyph,
                Some((x0, y0, x1, y1)) => (x0.min(glyph.0), y0.min(glyph.1), x1.max(glyph.2), y1.max(glyph.3)),
            });
        }
        bounds.map(|(x0, y0, x1, y1)| TextExtent {
            left: x0 * scale,
            top: y0 * scale,
            width: (x1 - x0) * scale,
            height: (y1 - y0) * scale,
        })
    }

    pub fn advance_extent(text: &str, scale: i32) -> TextExtent {
        TextExtent {
            left: 0,
            top: 0,
            width: text.chars().count() as i32 * ADVANCE * scale,
            height: GLYPH_H * scale,
        }
    }

    pub fn draw(img: &mut RgbaImage, text: &str, scale: i32, x: i32, y: i32, color: Rgba<u8>) {
        for (i, c) in text.chars().enumerate() {
            let Some(glyph_rows) = rows(c) else { continue };
            let cell_x = x + i as i32 * ADVANCE * scale;
            for (row, bits) in glyph_rows.iter().enumerate() {
                for col in 0..GLYPH_W {
                    if bits & (0x10 >> col) == 0 {
                        continue;
                    }
                    let px = cell_x + col * scale;
                    let py = y + row as i32 * scale;
                    for dy in 0..scale {
                        for dx in 0..scale {
                            blend_pixel(img, px + dx, py + dy, color, 1.0);
                        }
                    }
                }
            }
        }
    }
}
