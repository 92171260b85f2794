//! Image display helpers.

mod texture;

pub use texture::{color_image, preview_color};
