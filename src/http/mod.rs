//! HTTP request and response primitives.
//!
//! This module holds the request representation handed to handlers, the
//! method, version and status types, the ordered header collection used when
//! composing responses, and content-type sniffing for bodies written without
//! an explicit `Content-Type`.

mod error;
mod headers;
mod method;
mod request;
mod status;
mod version;
pub mod sniff;

// Re-export public items
pub use error::Error;
pub use headers::Headers;
pub use method::Method;
pub use request::Request;
pub use sniff::detect_content_type;
pub use status::StatusCode;
pub use version::HttpVersion;
