//! I/O error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for I/O and session operations.
pub type Result<T> = std::result::Result<T, Error>;

/// I/O error types.
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The selected file could not be decoded as an image.
    #[error("invalid image {}: {reason}", .path.display())]
    InvalidImage { path: PathBuf, reason: String },

    /// Image encoding error while saving an overlay.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Spreadsheet writer error.
    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// JSON decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An external collaborator process failed.
    #[error("collaborator error: {0}")]
    Collaborator(String),

    /// Core library error.
    #[error("core error: {0}")]
    CoreError(#[from] ringcal_core::Error),
}

impl Error {
    /// Whether this error is the operator cancelling the session.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::CoreError(ringcal_core::Error::UserCancelled))
    }
}
