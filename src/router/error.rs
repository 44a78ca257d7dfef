//! Error types for routing and response composition.

use std::path::PathBuf;
use thiserror::Error;

use crate::http::{Error as HttpError, Method};

/// Errors that can occur while registering routes or serving a request.
#[derive(Debug, Error)]
pub enum Error {
    /// Error building the request.
    #[error("Request error: {0}")]
    Http(#[from] HttpError),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// No registered route pattern matches the request path.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A route matched but has no handler for the request method.
    #[error("Method {0} not allowed for path: {1}")]
    MethodNotAllowed(Method, String),

    /// A handler asked for the default response but none was configured.
    #[error("no default response has been set")]
    NoDefaultResponse,

    /// A handler asked for the default error response but none was configured.
    #[error("no default error response has been set")]
    NoDefaultErrorResponse,

    /// The route pattern cannot be parsed.
    #[error("Invalid route pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A placeholder name appears twice in one route pattern.
    #[error("Duplicate path parameter {name:?} in route pattern {pattern:?}")]
    DuplicateParameter { pattern: String, name: String },

    /// The file to serve does not exist.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Reading the file to serve failed.
    #[error("Error reading file {path}: {source}")]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A handler failed.
    #[error("Internal server error: {0}")]
    InternalError(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
