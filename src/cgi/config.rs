//! Transport configuration.

use crate::http::HttpVersion;

/// CGI transport configuration.
#[derive(Debug, Clone)]
pub struct CgiConfig {
    /// The maximum number of body bytes read from standard input.
    pub max_body_size: usize,
    /// The version used when `SERVER_PROTOCOL` is missing or unrecognized.
    pub default_version: HttpVersion,
}

impl Default for CgiConfig {
    fn default() -> Self {
        Self {
            max_body_size: 8 * 1024 * 1024,
            default_version: HttpVersion::Http11,
        }
    }
}
