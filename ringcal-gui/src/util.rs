//! Conversions between plot coordinates and image pixels.
//!
//! The plot puts the image's bottom-left corner at the origin with y pointing
//! up; image pixels count rows from the top.

use std::f64::consts::TAU;

use ringcal_core::Point;

/// Convert u32 to f64.
pub fn u32_to_f64(value: u32) -> f64 {
    f64::from(value)
}

/// Convert u32 to f32 with allowed precision loss.
#[allow(clippy::cast_precision_loss)]
pub fn u32_to_f32(value: u32) -> f32 {
    value as f32
}

/// Convert an i64 pixel quantity to f64 with allowed precision loss.
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

/// Map a plot coordinate to the pixel under it.
///
/// Returns `None` if the coordinate is not finite or lies outside a
/// `width` x `height` image.
#[allow(clippy::cast_possible_truncation)]
pub fn plot_to_pixel(x: f64, y: f64, width: u32, height: u32) -> Option<Point> {
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    let column = x.floor();
    let row = (u32_to_f64(height) - y).floor();
    if column < 0.0 || row < 0.0 || column >= u32_to_f64(width) || row >= u32_to_f64(height) {
        return None;
    }
    // Bounded by width/height above, so both fit in i32.
    Some(Point::new(column as i32, row as i32))
}

/// Plot coordinate of a pixel's centre.
pub fn pixel_to_plot(point: Point, height: u32) -> [f64; 2] {
    let x = f64::from(point.x) + 0.5;
    let y = u32_to_f64(height) - f64::from(point.y) - 0.5;
    [x, y]
}

/// Closed polyline approximating a circle, in plot coordinates.
pub fn circle_polyline(center: Point, radius: i64, height: u32, segments: usize) -> Vec<[f64; 2]> {
    let [cx, cy] = pixel_to_plot(center, height);
    let r = i64_to_f64(radius);
    let segments = segments.max(3);
    (0..=segments)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let angle = TAU * i as f64 / segments as f64;
            [cx + r * angle.cos(), cy + r * angle.sin()]
        })
        .collect()
}

/// Format a multiplier the way the checkbox list shows it.
#[must_use]
pub fn format_multiplier(value: f64) -> String {
    format!("{value:?}x")
}
