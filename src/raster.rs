//! Pixel-level drawing primitives on an RGBA canvas.
//!
//! Every primitive composites with source-over blending, so an opaque color
//! replaces the pixel and a translucent one tints it. Coordinates are signed;
//! anything outside the canvas is clipped silently.

use image::{Rgba, RgbaImage};

/// Composite `src` over `dst`, with `coverage` scaling the source alpha.
pub fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>, coverage: f32) {
    let src_a = src[3] as f32 / 255.0 * coverage.clamp(0.0, 1.0);
    if src_a <= 0.0 {
        return;
    }
    if src_a >= 1.0 {
        *dst = src;
        return;
    }

    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    for c in 0..3 {
        let mixed = (src[c] as f32 * src_a + dst[c] as f32 * dst_a * (1.0 - src_a)) / out_a;
        dst[c] = mixed.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round() as u8;
}

/// Blend a single pixel, ignoring coordinates outside the canvas.
pub fn blend_pixel(img: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>, coverage: f32) {
    if x < 0 || y < 0 || x >= img.width() as i32 || y >= img.height() as i32 {
        return;
    }
    blend(img.get_pixel_mut(x as u32, y as u32), color, coverage);
}

/// Fill the axis-aligned ellipse inscribed in the inclusive box
/// `[cx - rx, cy - ry, cx + rx, cy + ry]`.
pub fn fill_ellipse(img: &mut RgbaImage, cx: i32, cy: i32, rx: i32, ry: i32, color: Rgba<u8>) {
    let (rx, ry) = (rx.max(0), ry.max(0));
    // Half a pixel of slack so the extreme rows and columns of the box get ink.
    let nx = rx as f32 + 0.5;
    let ny = ry as f32 + 0.5;

    for y in (cy - ry)..=(cy + ry) {
        let dy = (y - cy) as f32 / ny;
        for x in (cx - rx)..=(cx + rx) {
            let dx = (x - cx) as f32 / nx;
            if dx * dx + dy * dy <= 1.0 {
                blend_pixel(img, x, y, color, 1.0);
            }
        }
    }
}

/// Draw a horizontal segment from `x0` to `x1` inclusive, `width` rows thick
/// starting at row `y`.
pub fn draw_hline(img: &mut RgbaImage, x0: i32, x1: i32, y: i32, width: i32, color: Rgba<u8>) {
    let (start, end) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
    for row in y..y + width.max(1) {
        for x in start..=end {
            blend_pixel(img, x, row, color, 1.0);
        }
    }
}

/// Cut the four corners of the canvas to quarter circles of `radius`,
/// leaving transparent pixels outside and a one-pixel soft edge.
pub fn round_corners(img: &mut RgbaImage, radius: u32) {
    let (width, height) = img.dimensions();
    let radius = radius.min(width / 2).min(height / 2);
    if radius == 0 {
        return;
    }

    let r = radius as f32;
    let centers = [
        (r, r),
        (width as f32 - r, r),
        (r, height as f32 - r),
        (width as f32 - r, height as f32 - r),
    ];

    for y in 0..height {
        for x in 0..width {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;

            let (center_x, center_y) = match (px < r, py < r, px > width as f32 - r, py > height as f32 - r) {
                (true, true, _, _) => centers[0],
                (_, true, true, _) => centers[1],
                (true, _, _, true) => centers[2],
                (_, _, true, true) => centers[3],
                _ => continue,
            };

            let dx = px - center_x;
            let dy = py - center_y;
            let distance = (dx * dx + dy * dy).sqrt();

            if distance > r {
                img.put_pixel(x, y, Rgba([0, 0, 0, 0]));
            } else if distance > r - 1.0 {
                let pixel = img.get_pixel_mut(x, y);
                pixel[3] = (pixel[3] as f32 * (r - distance)) as u8;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_source_replaces_pixel() {
        let mut dst = Rgba([10, 20, 30, 40]);
        blend(&mut dst, Rgba([200, 100, 50, 255]), 1.0);
        assert_eq!(dst, Rgba([200, 100, 50, 255]));
    }

    #[test]
    fn translucent_over_transparent_keeps_source_color() {
        let mut dst = Rgba([0, 0, 0, 0]);
        blend(&mut dst, Rgba([255, 255, 255, 100]), 1.0);
        assert_eq!(dst, Rgba([255, 255, 255, 100]));
    }

    #[test]
    fn translucent_over_opaque_mixes() {
        let mut dst = Rgba([0, 0, 0, 255]);
        blend(&mut dst, Rgba([255, 255, 255, 128]), 1.0);
        assert_eq!(dst[3], 255);
        assert!(dst[0] > 120 && dst[0] < 135, "got {:?}", dst);
    }

    #[test]
    fn ellipse_is_clipped_to_canvas() {
        let mut img = RgbaImage::new(8, 8);
        fill_ellipse(&mut img, 0, 0, 6, 6, Rgba([255, 0, 0, 255]));
        assert_eq!(*img.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(*img.get_pixel(7, 7), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn zero_radius_ellipse_fills_one_pixel() {
        let mut img = RgbaImage::new(4, 4);
        fill_ellipse(&mut img, 2, 1, 0, 0, Rgba([1, 2, 3, 255]));
        let filled = img.pixels().filter(|p| p[3] != 0).count();
        assert_eq!(filled, 1);
        assert_eq!(*img.get_pixel(2, 1), Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn rounded_corners_clear_the_extreme_corner() {
        let mut img = RgbaImage::from_pixel(64, 64, Rgba([9, 9, 9, 255]));
        round_corners(&mut img, 8);
        assert_eq!(img.get_pixel(0, 0)[3], 0);
        assert_eq!(img.get_pixel(63, 63)[3], 0);
        assert_eq!(img.get_pixel(32, 32)[3], 255);
        assert_eq!(img.get_pixel(32, 0)[3], 255);
    }
}
