//! Ring overlay rendering.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut};
use log::debug;
use ringcal_core::{Calibration, Point, Ring};

use crate::config::SessionConfig;

/// Draw the click markers and every drawable ring onto a copy of `source`.
///
/// Rings with a zero or negative radius are skipped.
#[must_use]
pub fn render_overlay(source: &RgbImage, calibration: &Calibration, config: &SessionConfig) -> RgbImage {
    let mut canvas = source.clone();
    for point in &calibration.endpoints {
        draw_marker(&mut canvas, *point, config);
    }
    for ring in &calibration.rings {
        draw_ring(&mut canvas, ring, config);
    }
    canvas
}

/// Filled marker at a clicked point.
pub fn draw_marker(canvas: &mut RgbImage, point: Point, config: &SessionConfig) {
    let radius = i32::try_from(config.marker_radius).unwrap_or(i32::MAX);
    draw_filled_circle_mut(canvas, (point.x, point.y), radius, Rgb(config.marker_color));
}

/// Hollow ring outline, `ring_thickness` pixels wide.
pub fn draw_ring(canvas: &mut RgbImage, ring: &Ring, config: &SessionConfig) {
    let radius = match i32::try_from(ring.radius) {
        Ok(r) if r > 0 => r,
        _ => {
            debug!(
                "skipping ring with multiplier {} and radius {}",
                ring.multiplier, ring.radius
            );
            return;
        }
    };
    let thickness = i32::try_from(config.ring_thickness.max(1)).unwrap_or(1);
    let inner = radius - (thickness - 1) / 2;
    for r in (inner..inner + thickness).filter(|r| *r > 0) {
        draw_hollow_circle_mut(canvas, (ring.center.x, ring.center.y), r, Rgb(config.ring_color));
    }
}
