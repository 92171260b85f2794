//! Error types for ringcal-core.

use thiserror::Error;

/// Result type alias for ringcal operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for ringcal operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The operator cancelled the session (no image chosen or cancel key pressed).
    #[error("session cancelled by user")]
    UserCancelled,

    /// A measurement record lacks one of the required fixed fields.
    #[error("malformed record #{index}{}: missing required field '{field}'", display_file(.file_name.as_deref()))]
    MalformedRecord {
        /// Zero-based position of the record in the input.
        index: usize,
        /// Name of the missing field.
        field: String,
        /// File name carried by the record, if it has one.
        file_name: Option<String>,
    },

    /// A record carries a bend index wider than a result table can hold.
    #[error("record #{index}: bend index {bend} exceeds the maximum of {max}")]
    BendIndexOutOfRange {
        /// Zero-based position of the record in the input.
        index: usize,
        /// Offending bend index.
        bend: usize,
        /// Largest accepted bend index.
        max: usize,
    },

    /// Point text could not be parsed.
    #[error("invalid point '{0}': expected 'x,y'")]
    InvalidPoint(String),

    /// An external collaborator failed.
    #[error("collaborator error: {0}")]
    Collaborator(String),
}

fn display_file(file_name: Option<&str>) -> String {
    file_name.map_or_else(String::new, |name| format!(" ({name})"))
}
