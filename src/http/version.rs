//! Protocol version tokens.

use std::fmt;
use std::str::FromStr;

use crate::http::error::Error;

/// Protocol version of a request and its response.
///
/// Read from `SERVER_PROTOCOL` by the CGI transport, which falls back to
/// `CgiConfig::default_version` for a missing or unknown token. The response
/// echoes it as the first token of its status line, e.g. `HTTP/1.1 200 OK`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpVersion {
    Http10,
    #[default]
    Http11,
    Http20,
}

impl HttpVersion {
    /// The token written at the start of a status line.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVersion::Http10 => "HTTP/1.0",
            HttpVersion::Http11 => "HTTP/1.1",
            HttpVersion::Http20 => "HTTP/2",
        }
    }
}

impl FromStr for HttpVersion {
    type Err = Error;

    /// Parse a `SERVER_PROTOCOL` token; `HTTP/2.0` is accepted for `HTTP/2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HTTP/1.0" => Ok(HttpVersion::Http10),
            "HTTP/1.1" => Ok(HttpVersion::Http11),
            "HTTP/2" | "HTTP/2.0" => Ok(HttpVersion::Http20),
            _ => Err(Error::InvalidVersion(s.to_string())),
        }
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
