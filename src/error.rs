//! Error types for sql_diff

use thiserror::Error;

/// Result type for sql_diff operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for sql_diff
///
/// Parsing is best-effort and never fails on malformed SQL; the only
/// failure the core can surface is an I/O error from the line source.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Convert Serde JSON errors to sql_diff errors
impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::SerializationError(error.to_string())
    }
}
