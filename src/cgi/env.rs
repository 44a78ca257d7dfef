//! Request metadata from CGI environment variables.

use std::collections::HashMap;

use crate::cgi::config::CgiConfig;
use crate::http::{Error, Method, Request};

pub const REQUEST_METHOD: &str = "REQUEST_METHOD";
pub const X_MATCHED_ROUTE: &str = "X_MATCHED_ROUTE";
pub const PATH_INFO: &str = "PATH_INFO";
pub const QUERY_STRING: &str = "QUERY_STRING";
pub const SERVER_PROTOCOL: &str = "SERVER_PROTOCOL";
pub const X_FULL_URL: &str = "X_FULL_URL";
pub const CONTENT_TYPE: &str = "CONTENT_TYPE";
pub const CONTENT_LENGTH: &str = "CONTENT_LENGTH";

/// `HTTP_USER_AGENT` -> `User-Agent`
fn header_name(var: &str) -> String {
    var.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let lower = part.to_ascii_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join("-")
}

/// The request metadata of one CGI invocation.
///
/// Built once from the process environment; every routing decision reads
/// from this snapshot rather than from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CgiEnv {
    pub method: Option<String>,
    pub matched_route: Option<String>,
    pub path_info: Option<String>,
    pub query_string: Option<String>,
    pub protocol: Option<String>,
    pub full_url: Option<String>,
    pub content_type: Option<String>,
    pub content_length: Option<usize>,
    /// Request headers from `HTTP_*` variables.
    pub headers: HashMap<String, String>,
}

impl CgiEnv {
    /// Collect the variables this crate understands, ignoring the rest.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut env = CgiEnv::default();
        for (key, value) in vars {
            let key = key.as_ref();
            let value: String = value.into();
            match key {
                REQUEST_METHOD => env.method = Some(value),
                X_MATCHED_ROUTE => env.matched_route = Some(value),
                PATH_INFO => env.path_info = Some(value),
                QUERY_STRING => env.query_string = Some(value),
                SERVER_PROTOCOL => env.protocol = Some(value),
                X_FULL_URL => env.full_url = Some(value),
                CONTENT_TYPE => env.content_type = Some(value),
                CONTENT_LENGTH => match value.trim().parse() {
                    Ok(length) => env.content_length = Some(length),
                    Err(_) => log::warn!("ignoring invalid {CONTENT_LENGTH}: {value:?}"),
                },
                _ => {
                    if let Some(name) = key.strip_prefix("HTTP_") {
                        env.headers.insert(header_name(name), value);
                    }
                }
            }
        }
        env
    }

    /// Snapshot the current process environment.
    pub fn from_process() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// The path used for routing: `X_MATCHED_ROUTE`, else `PATH_INFO`, else `/`.
    pub fn route_path(&self) -> &str {
        [&self.matched_route, &self.path_info]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|p| !p.is_empty())
            .unwrap_or("/")
    }

    /// Build the request served by this invocation.
    pub fn into_request(self, body: Vec<u8>, config: &CgiConfig) -> Result<Request, Error> {
        let method: Method = self
            .method
            .as_deref()
            .ok_or_else(|| Error::MissingVariable(REQUEST_METHOD.to_string()))?
            .parse()?;

        let version = match self.protocol.as_deref() {
            Some(protocol) => protocol.parse().unwrap_or_else(|_| {
                log::warn!("unrecognized {SERVER_PROTOCOL} {protocol:?}, using {}", config.default_version);
                config.default_version
            }),
            None => config.default_version,
        };

        let mut path = self.route_path().to_string();
        if let Some(query) = self.query_string.as_deref().filter(|q| !q.is_empty()) {
            path.push('?');
            path.push_str(query);
        }

        let mut headers = self.headers;
        if let Some(content_type) = self.content_type {
            headers.insert("Content-Type".to_string(), content_type);
        }
        if let Some(length) = self.content_length {
            headers.insert("Content-Length".to_string(), length.to_string());
        }

        let mut request = Request::new(method, path, version, headers).with_body(body);
        request.full_url = self.full_url;
        Ok(request)
    }
}

