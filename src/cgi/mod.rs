//! CGI transport.
//!
//! Each process invocation serves exactly one request: metadata comes from
//! environment variables, the body from standard input, and the composed
//! response goes to standard output.
//!
//! ```no_run
//! use cgiroute_rs::{cgi, Method, RouteHandler, Router};
//!
//! let mut router = Router::new();
//! router
//!     .handle("/hello", RouteHandler::new().method_handler(Method::GET, |w, _req, _ctx| {
//!         w.write(b"Hello World!!");
//!         Ok(())
//!     }))
//!     .unwrap();
//!
//! cgi::serve(&mut router).unwrap();
//! ```

mod config;
mod env;
mod transport;

// Re-export public items
pub use config::CgiConfig;
pub use env::{
    CgiEnv, CONTENT_LENGTH, CONTENT_TYPE, PATH_INFO, QUERY_STRING, REQUEST_METHOD, SERVER_PROTOCOL,
    X_FULL_URL, X_MATCHED_ROUTE,
};
pub use transport::{serve, serve_io, serve_with_config};
