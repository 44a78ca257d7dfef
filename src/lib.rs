//! Path-parameter routing and response composition for CGI-style handlers.
//!
//! Each process invocation serves one request. This library resolves the
//! request path against registered route patterns, extracts the bound path
//! parameters, dispatches to the handler registered for the request method
//! and composes the response bytes.
//!
//! # Features
//!
//! - Route patterns with whole-segment placeholders (`/greeting/{type}`)
//! - One handler per (route, method) pair, any method token accepted
//! - Default responses and default error responses a handler can trigger
//! - Structured `application/problem+json` error bodies
//! - Content-type sniffing for bodies written without a `Content-Type`
//! - A leveled key/value logger attached to the router
//! - A CGI transport reading the environment, stdin and stdout
//!
//! # Examples
//!
//! ## Path parameters
//!
//! ```
//! use cgiroute_rs::{Method, Request, ResponseWriter, RouteHandler, Router};
//!
//! let greeting = RouteHandler::new().method_handler(Method::GET, |w, _req, ctx| {
//!     match ctx.param("type") {
//!         Some("hello") => w.write(b"Hello World!!\n"),
//!         Some("goodbye") => w.write(b"Goodbye for now!!!\n"),
//!         _ => w.write(b"Hi?\n"),
//!     };
//!     Ok(())
//! });
//!
//! let mut router = Router::new();
//! router.handle("/greeting/{type}", greeting).unwrap();
//!
//! let request = Request::get("/greeting/hello");
//! let mut response = ResponseWriter::new(request.version);
//! router.serve(&request, &mut response).unwrap();
//!
//! assert_eq!(
//!     response.as_bytes(),
//!     b"HTTP/1.1 200 OK\nContent-Type: text/plain; charset=utf-8\n\nHello World!!\n"
//! );
//! ```
//!
//! ## Error handling
//!
//! ```
//! use cgiroute_rs::{Request, ResponseWriter, Router, RouterError};
//!
//! let mut router = Router::new();
//! let request = Request::get("/missing");
//! let mut response = ResponseWriter::new(request.version);
//!
//! match router.serve(&request, &mut response) {
//!     Err(RouterError::NotFound(path)) => assert_eq!(path, "/missing"),
//!     other => panic!("unexpected result: {other:?}"),
//! }
//! assert!(String::from_utf8_lossy(response.as_bytes()).contains("\"status\": 404"));
//! ```
//!
//! See the `demos` directory for a complete CGI program.

// Export the http module
pub mod http;

// Export the router module
pub mod router;

// Export the logger module
pub mod logger;

// Export the cgi module
pub mod cgi;

// Re-export commonly used items for convenience
pub use http::{detect_content_type, Error as HttpError, Headers, HttpVersion, Method, Request, StatusCode};
pub use logger::{Error as LoggerError, Level, Logger};
pub use router::{
    match_path, serve_file, Context, Error as RouterError, PathParams, ProblemDetails, ResponseWriter,
    RouteHandler, RoutePattern, Router, Serve,
};
