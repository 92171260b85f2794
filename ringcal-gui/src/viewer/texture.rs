//! Texture generation for the source image.

use egui::{Color32, ColorImage};
use image::RgbImage;

/// Convert a decoded RGB image into an egui color image of the same size.
#[must_use]
pub fn color_image(pixels: &RgbImage) -> ColorImage {
    let (width, height) = pixels.dimensions();
    ColorImage::from_rgb([width as usize, height as usize], pixels.as_raw())
}

/// Preview color for an overlay RGB triple.
#[must_use]
pub fn preview_color(rgb: [u8; 3]) -> Color32 {
    let [r, g, b] = rgb;
    Color32::from_rgb(r, g, b)
}
