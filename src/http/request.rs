//! Request representation handed to route handlers.

use std::collections::HashMap;
use serde::de::DeserializeOwned;

use crate::http::error::Error;
use crate::http::method::Method;
use crate::http::version::HttpVersion;

/// Represents an incoming request.
///
/// Every piece of per-request routing metadata (method, matched route, full
/// URL) is a plain field filled once by the transport, so handlers never read
/// it from process state.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The request path, including any query string
    pub path: String,
    /// The HTTP version
    pub version: HttpVersion,
    /// The HTTP headers
    pub headers: HashMap<String, String>,
    /// The request body
    pub body: Vec<u8>,
    /// Query parameters parsed from the path
    pub query_params: HashMap<String, String>,
    /// The full URL of the request, used as the `type` of problem bodies
    pub full_url: Option<String>,
}

impl Request {
    /// Create a new request with an empty body.
    ///
    /// Query parameters are parsed from the part of `path` after `?`.
    pub fn new(method: Method, path: impl Into<String>, version: HttpVersion, headers: HashMap<String, String>) -> Self {
        let path = path.into();
        let query_params: HashMap<String, String> = path
            .split_once('?')
            .map(|(_, query)| {
                query
                    .split('&')
                    .filter(|s| !s.is_empty())
                    .map(|pair| match pair.split_once('=') {
                        Some((k, v)) => (k.to_string(), v.to_string()),
                        None => (pair.to_string(), String::new()),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            method,
            path,
            version,
            headers,
            body: Vec::new(),
            query_params,
            full_url: None,
        }
    }

    /// Shorthand for a header-less HTTP/1.1 request, mostly useful in tests.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path, HttpVersion::Http11, HashMap::new())
    }

    /// Set the request body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Set the full URL of the request.
    pub fn with_full_url(mut self, url: impl Into<String>) -> Self {
        self.full_url = Some(url.into());
        self
    }

    /// The path used for routing: [`Request::path`] without its query string.
    pub fn route_path(&self) -> &str {
        match self.path.split_once('?') {
            Some((route, _)) => route,
            None => &self.path,
        }
    }

    /// Get a header value (case-insensitive).
    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                Some(v)
            } else {
                None
            }
        })
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.get_header(name).is_some()
    }

    /// Parse the request body as JSON.
    ///
    /// Fails with [`Error::MissingHeader`] unless the request declares an
    /// `application/json` content type.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        if !self.is_json() {
            return Err(Error::MissingHeader("Content-Type: application/json".to_string()));
        }

        let json = serde_json::from_slice(&self.body)?;
        Ok(json)
    }

    /// Check if the request has a JSON body.
    pub fn is_json(&self) -> bool {
        if let Some(content_type) = self.get_header("Content-Type") {
            content_type.starts_with("application/json")
        } else {
            false
        }
    }

    /// Get a query parameter value.
    pub fn get_query_param(&self, name: &str) -> Option<&String> {
        self.query_params.get(name)
    }

    pub fn has_query_param(&self, name: &str) -> bool {
        self.query_params.contains_key(name)
    }
}
