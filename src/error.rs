//! Error types for unoutline library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for unoutline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading spans or extracting an outline.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input document does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Malformed JSON input.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input format is not recognized.
    #[error("Unknown input format: expected a span dump or layout boxes")]
    UnknownFormat,

    /// The input is recognized but cannot be read by this crate.
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    /// The input was parsed but its content is inconsistent.
    #[error("Invalid source: {0}")]
    InvalidSource(String),

    /// A lexicon pattern failed to compile.
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// A lexicon table is inconsistent.
    #[error("Lexicon error: {0}")]
    Lexicon(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error means the input could not be located.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound(_) => true,
            Error::Io(e) => e.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
