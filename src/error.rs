//! Error types for the scriptbook library.

use std::io;
use thiserror::Error;

/// Result type alias for scriptbook operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading, saving, or running notebooks.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error encoding the raw notebook JSON format.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension does not map to a known script dialect.
    #[error("Unknown script dialect for extension: {0}")]
    UnknownDialect(String),

    /// The path has no extension to dispatch on.
    #[error("File has no extension: {0}")]
    MissingExtension(String),

    /// No codec is registered for the extension.
    #[error("No codec registered for extension: {0}")]
    UnsupportedExtension(String),

    /// Failure while talking to an interactive shell session.
    #[error("Shell session error: {0}")]
    Session(String),
}
