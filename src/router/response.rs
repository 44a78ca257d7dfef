//! Response composition.
//!
//! A composed response is the status line, one line per header key, a blank
//! line and the raw body:
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: text/plain
//!
//! hello
//! ```

use std::io;
use serde::{Deserialize, Serialize};

use crate::http::{detect_content_type, Headers, HttpVersion, StatusCode};
use crate::router::error::Error;

/// Content type of structured error bodies.
pub const PROBLEM_JSON: &str = "application/problem+json";

/// Problem type used when the request carries no URL of its own.
pub const ABOUT_BLANK: &str = "about:blank";

/// Serialize a complete response.
pub fn compose(version: HttpVersion, status: StatusCode, headers: &Headers, body: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();

    // Add the status line
    let status_line = format!("{version} {} {}\n", status.as_u16(), status.reason_phrase());
    bytes.extend_from_slice(status_line.as_bytes());

    // Add the headers
    for (name, values) in headers.iter() {
        if name.is_empty() {
            continue;
        }
        let header_line = format!("{name}: {}\n", values.join(Headers::separator(name)));
        bytes.extend_from_slice(header_line.as_bytes());
    }

    // Add the empty line that separates headers from body
    bytes.push(b'\n');

    bytes.extend_from_slice(body);

    bytes
}

/// A structured error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_uri: String,
    pub detail: String,
    pub status: u16,
}

/// Lays JSON objects out as `{ "key": value, "key": value }`.
struct ProblemFormatter;

impl serde_json::ser::Formatter for ProblemFormatter {
    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b"{ ")
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b" }")
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

/// Build a structured error body for `status`.
///
/// An empty `type_uri` is replaced by `about:blank`.
pub fn problem_body(detail: &str, status: StatusCode, type_uri: &str) -> Result<Vec<u8>, Error> {
    let problem = ProblemDetails {
        type_uri: if type_uri.is_empty() { ABOUT_BLANK } else { type_uri }.to_string(),
        detail: detail.to_string(),
        status: status.as_u16(),
    };

    let mut body = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut body, ProblemFormatter);
    problem.serialize(&mut serializer)?;
    Ok(body)
}

/// Accumulates the response for one request.
///
/// The first body write fixes the status (200 unless set earlier), fills in
/// a sniffed `Content-Type` when none was set, and emits the status line and
/// headers. Every later write only appends body bytes. A response with a
/// status or headers but no body is emitted by [`finish`](Self::finish).
#[derive(Debug, Clone)]
pub struct ResponseWriter {
    version: HttpVersion,
    status: Option<StatusCode>,
    headers: Headers,
    head_written: bool,
    buffer: Vec<u8>,
}

impl ResponseWriter {
    /// Create a writer whose status line starts with `version`.
    pub fn new(version: HttpVersion) -> Self {
        Self {
            version,
            status: None,
            headers: Headers::new(),
            head_written: false,
            buffer: Vec::new(),
        }
    }

    pub fn version(&self) -> HttpVersion {
        self.version
    }

    /// The status, once decided.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Headers to send. Changes made after the first write are not sent.
    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    /// Set the response status.
    ///
    /// Only the first call has an effect.
    pub fn write_header(&mut self, status: StatusCode) {
        match self.status {
            Some(current) => {
                log::warn!("superfluous write_header({status}): status already set to {current}");
            }
            None => self.status = Some(status),
        }
    }

    /// Append `body` to the response, emitting the head first if needed.
    ///
    /// Returns the number of body bytes written.
    pub fn write(&mut self, body: &[u8]) -> usize {
        if !self.head_written {
            if !self.headers.has("Content-Type") {
                self.headers.set("Content-Type", detect_content_type(body));
            }
            self.write_head();
        }
        self.buffer.extend_from_slice(body);
        body.len()
    }

    /// Emit the status line and headers of a response without a body.
    ///
    /// Does nothing when the head is already out, or when neither a status
    /// nor a header was set, so an untouched writer stays empty.
    pub fn finish(&mut self) {
        if self.head_written || (self.status.is_none() && self.headers.is_empty()) {
            return;
        }
        self.write_head();
    }

    fn write_head(&mut self) {
        let status = *self.status.get_or_insert(StatusCode::OK);
        let head = compose(self.version, status, &self.headers, &[]);
        self.buffer.extend_from_slice(&head);
        self.head_written = true;
    }

    /// Write a structured error body with `status`.
    ///
    /// Replaces a status that was set but not yet sent, so the status line
    /// agrees with the body.
    pub fn error(&mut self, status: StatusCode, detail: &str, type_uri: &str) -> Result<usize, Error> {
        let body = problem_body(detail, status, type_uri)?;
        if self.head_written {
            self.write_header(status);
        } else {
            self.status = Some(status);
            self.headers.set("Content-Type", PROBLEM_JSON);
        }
        Ok(self.write(&body))
    }

    /// Write `value` as an `application/json` body.
    pub fn json<T: Serialize>(&mut self, value: &T) -> Result<usize, Error> {
        let body = serde_json::to_vec(value)?;
        self.headers.set("Content-Type", "application/json");
        Ok(self.write(&body))
    }

    /// Whether the status line and headers have been emitted.
    pub fn is_written(&self) -> bool {
        self.head_written
    }

    /// The composed bytes so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

impl Default for ResponseWriter {
    fn default() -> Self {
        Self::new(HttpVersion::default())
    }
}

impl io::Write for ResponseWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(ResponseWriter::write(self, buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
