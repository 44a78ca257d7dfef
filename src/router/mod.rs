//! Routing, dispatch and response composition.
//!
//! A [`Router`] maps route patterns such as `/greeting/{type}` to
//! [`RouteHandler`]s, each of which holds one handler function per method.
//! Handlers write through a [`ResponseWriter`] and get their path
//! parameters and default responses from a request-scoped [`Context`].

mod context;
mod error;
mod file;
mod handler;
mod pattern;
mod response;
#[allow(clippy::module_inception)]
mod router;
mod tests;

use crate::http::Request;

// Re-export public items
pub use context::{Context, DefaultError};
pub use error::Error;
pub use file::{serve_file, DEFAULT_FILE_CONTENT_TYPE};
pub use handler::{HandlerFn, RouteHandler};
pub use pattern::{match_path, PathParams, RoutePattern, Segment};
pub use response::{compose, problem_body, ProblemDetails, ResponseWriter, ABOUT_BLANK, PROBLEM_JSON};
pub use router::Router;

/// An entry point that can serve a request: a [`Router`] or a single
/// [`RouteHandler`].
pub trait Serve {
    /// Serve `request`, writing the response into `writer`.
    fn serve(&mut self, request: &Request, writer: &mut ResponseWriter) -> Result<(), Error>;
}
