//! Error types for request construction.

use thiserror::Error;

/// Errors that can occur while building or inspecting a request.
#[derive(Debug, Error)]
pub enum Error {
    /// The method token is empty or contains characters outside the token grammar.
    #[error("Invalid HTTP method: {0:?}")]
    InvalidMethod(String),

    /// The protocol version is not supported.
    #[error("Invalid HTTP version: {0}")]
    InvalidVersion(String),

    /// The status code is outside 100..=999.
    #[error("Invalid status code: {0}")]
    InvalidStatusCode(u16),

    /// A required transport variable is missing.
    #[error("Required variable is missing: {0}")]
    MissingVariable(String),

    /// A required header is missing from the request.
    #[error("Required header is missing: {0}")]
    MissingHeader(String),

    /// Error parsing JSON.
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}
