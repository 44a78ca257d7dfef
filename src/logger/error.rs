//! Error types for the logger.

use thiserror::Error;

/// Errors that can occur while configuring or writing to a logger.
#[derive(Debug, Error)]
pub enum Error {
    /// The level name is not recognized.
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    /// Writing to the sink failed.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serializing the record failed.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
