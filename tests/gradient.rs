use aeye_icons::gradient::{fill_radial, fill_vertical, radial_center, GradientStops};
use aeye_icons::Error;
use image::{Rgba, RgbaImage};

fn navy() -> GradientStops {
    GradientStops::two(Rgba([26, 54, 93, 255]), Rgba([15, 23, 42, 255]))
}

fn blues() -> GradientStops {
    GradientStops::three(
        Rgba([59, 130, 246, 255]),
        Rgba([37, 99, 235, 255]),
        Rgba([30, 64, 175, 255]),
    )
}

fn close(a: Rgba<u8>, b: Rgba<u8>, tolerance: i32) -> bool {
    (0..4).all(|c| (a[c] as i32 - b[c] as i32).abs() <= tolerance)
}

#[test]
fn radial_center_gets_the_innermost_color() {
    let stops = navy();
    for width in 2..=40 {
        for height in [2, 3, 7, 16, 33, 40] {
            let mut img = RgbaImage::new(width, height);
            fill_radial(&mut img, &stops, 2);
            let (cx, cy) = radial_center(width, height);
            assert_eq!(
                *img.get_pixel(cx as u32, cy as u32),
                stops.last(),
                "{width}x{height}"
            );
        }
    }
}

#[test]
fn radial_rings_crossing_the_edge_leave_corners_empty() {
    let mut img = RgbaImage::new(64, 64);
    fill_radial(&mut img, &navy(), 2);
    assert_eq!(img.get_pixel(0, 0)[3], 0);
    assert_eq!(img.get_pixel(63, 63)[3], 0);
}

#[test]
fn radial_gets_lighter_towards_the_rim() {
    let mut img = RgbaImage::new(256, 256);
    fill_radial(&mut img, &navy(), 2);
    let (cx, cy) = radial_center(256, 256);
    let center = img.get_pixel(cx as u32, cy as u32);
    let rim = img.get_pixel(cx as u32, 1);
    assert_eq!(rim[3], 255);
    assert!(rim[2] > center[2], "rim {rim:?} center {center:?}");
}

#[test]
fn vertical_rows_hit_the_stops() {
    let stops = blues();
    for height in [2, 4, 10, 64, 101, 512] {
        let mut img = RgbaImage::new(3, height);
        fill_vertical(&mut img, &stops);
        assert_eq!(*img.get_pixel(0, 0), stops.as_slice()[0], "height {height}");
        let middle = *img.get_pixel(2, height / 2);
        assert!(close(middle, stops.as_slice()[1], 1), "height {height}: {middle:?}");
    }
}

#[test]
fn vertical_rows_are_uniform() {
    let mut img = RgbaImage::new(17, 40);
    fill_vertical(&mut img, &blues());
    for (y, row) in img.rows().enumerate() {
        let first = img.get_pixel(0, y as u32);
        assert!(row.into_iter().all(|p| p == first));
    }
}

#[test]
fn two_stop_vertical_runs_end_to_end() {
    let stops = navy();
    let mut img = RgbaImage::new(1, 100);
    fill_vertical(&mut img, &stops);
    assert_eq!(*img.get_pixel(0, 0), stops.first());
    assert!(close(*img.get_pixel(0, 99), stops.last(), 1));
}

#[test]
fn a_single_stop_is_rejected() {
    let err = GradientStops::new(vec![Rgba([0, 0, 0, 255])]).unwrap_err();
    assert!(matches!(err, Error::TooFewStops(1)));
}
