//! Gradient backgrounds.

use image::{Rgba, RgbaImage};

use crate::error::{Error, Result};
use crate::raster::fill_ellipse;

/// Ordered interpolation anchors for a gradient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientStops(Vec<Rgba<u8>>);

impl GradientStops {
    pub fn new(stops: Vec<Rgba<u8>>) -> Result<Self> {
        if stops.len() < 2 {
            return Err(Error::TooFewStops(stops.len()));
        }
        Ok(Self(stops))
    }

    pub fn two(from: Rgba<u8>, to: Rgba<u8>) -> Self {
        Self(vec![from, to])
    }

    pub fn three(start: Rgba<u8>, middle: Rgba<u8>, end: Rgba<u8>) -> Self {
        Self(vec![start, middle, end])
    }

    pub fn first(&self) -> Rgba<u8> {
        self.0[0]
    }

    pub fn last(&self) -> Rgba<u8> {
        self.0[self.0.len() - 1]
    }

    pub fn as_slice(&self) -> &[Rgba<u8>] {
        &self.0
    }

    /// Color at normalized position `progress`, interpolating between the two
    /// stops that bracket it.
    pub fn sample(&self, progress: f32) -> Rgba<u8> {
        let progress = progress.clamp(0.0, 1.0);
        let segments = (self.0.len() - 1) as f32;
        let scaled = progress * segments;
        let index = (scaled.floor() as usize).min(self.0.len() - 2);
        let t = scaled - index as f32;
        lerp(self.0[index], self.0[index + 1], t)
    }
}

/// Linear blend of the color channels, truncated toward zero. The result is
/// always opaque.
pub fn lerp(from: Rgba<u8>, to: Rgba<u8>, t: f32) -> Rgba<u8> {
    let channel = |i: usize| (from[i] as f32 * (1.0 - t) + to[i] as f32 * t) as u8;
    Rgba([channel(0), channel(1), channel(2), 255])
}

/// Center of the radial gradient: horizontally centered, one third down.
pub fn radial_center(width: u32, height: u32) -> (i32, i32) {
    ((width / 2) as i32, (height / 3) as i32)
}

/// Paint concentric disks from the outermost radius inwards, blending from
/// the first stop at the rim to the last stop at the center.
///
/// A disk is painted only if its bounding box lies entirely inside the
/// canvas; rings that would cross an edge are skipped, not clipped, so
/// corners of the canvas can stay transparent.
pub fn fill_radial(img: &mut RgbaImage, stops: &GradientStops, ring_step: usize) {
    let (width, height) = img.dimensions();
    let (center_x, center_y) = radial_center(width, height);
    let max_radius = ((width as f64).hypot(height as f64) * 0.7) as i32;
    if max_radius <= 0 {
        return;
    }

    let mut radii: Vec<i32> = (1..=max_radius).rev().step_by(ring_step.max(1)).collect();
    radii.push(0);

    for radius in radii {
        let progress = 1.0 - radius as f32 / max_radius as f32;
        let color = lerp(stops.first(), stops.last(), progress);

        let left = center_x - radius;
        let top = center_y - radius;
        let right = center_x + radius;
        let bottom = center_y + radius;

        if left >= 0 && top >= 0 && right < width as i32 && bottom < height as i32 {
            fill_ellipse(img, center_x, center_y, radius, radius, color);
        }
    }
}

/// Fill every row with one solid color sampled at `row / height`.
pub fn fill_vertical(img: &mut RgbaImage, stops: &GradientStops) {
    let (width, height) = img.dimensions();
    for y in 0..height {
        let color = stops.sample(y as f32 / height as f32);
        for x in 0..width {
            img.put_pixel(x, y, color);
        }
    }
}
