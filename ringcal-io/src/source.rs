//! Source image loading.

use std::path::{Path, PathBuf};

use image::RgbImage;
use log::info;

use crate::{Error, Result};

/// File extensions offered when picking a source image.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

/// A decoded source image and where it came from.
#[derive(Clone, Debug)]
pub struct SourceImage {
    path: PathBuf,
    file_name: String,
    pixels: RgbImage,
}

impl SourceImage {
    /// Wrap already-decoded pixels.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, pixels: RgbImage) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            file_name,
            pixels,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base file name, stamped on rings as provenance.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    /// `(width, height)` in pixels.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }
}

/// Open and decode an image as 8-bit RGB.
///
/// # Errors
/// [`Error::InvalidImage`] when the file cannot be read or decoded.
pub fn load_image(path: &Path) -> Result<SourceImage> {
    let decoded = image::open(path).map_err(|e| Error::InvalidImage {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let image = SourceImage::new(path, decoded.to_rgb8());
    let (width, height) = image.dimensions();
    info!("Image size: {width}x{height} (Width x Height)");
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("disc.png");
        RgbImage::from_pixel(8, 6, image::Rgb([10, 20, 30]))
            .save(&path)
            .unwrap();

        let image = load_image(&path).unwrap();
        assert_eq!(image.dimensions(), (8, 6));
        assert_eq!(image.file_name(), "disc.png");
        assert_eq!(image.pixels().get_pixel(0, 0).0, [10, 20, 30]);
    }

    #[test]
    fn test_undecodable_file_is_invalid_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image").unwrap();
        assert!(matches!(load_image(&path), Err(Error::InvalidImage { .. })));
    }

    #[test]
    fn test_missing_file_is_invalid_image() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_image(&dir.path().join("absent.bmp")).unwrap_err();
        assert!(matches!(err, Error::InvalidImage { .. }));
    }
}
