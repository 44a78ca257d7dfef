//! Request-scoped context handed to route handlers.

use crate::http::StatusCode;
use crate::logger::Logger;
use crate::router::error::Error;
use crate::router::pattern::PathParams;
use crate::router::response::{ResponseWriter, ABOUT_BLANK};

/// A pre-configured error a handler can send without composing its own body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultError {
    pub detail: String,
    pub status: StatusCode,
}

/// Data derived for the request currently being served.
///
/// A context lives for exactly one handler invocation. It carries the bound
/// path parameters, the route's default response and default error (when
/// configured), and the router's logger (when one is attached).
#[derive(Debug)]
pub struct Context<'a> {
    params: PathParams,
    default_response: Option<&'a [u8]>,
    default_error: Option<&'a DefaultError>,
    problem_type: &'a str,
    logger: Option<&'a mut Logger>,
}

impl<'a> Context<'a> {
    pub(crate) fn new(
        params: PathParams,
        default_response: Option<&'a [u8]>,
        default_error: Option<&'a DefaultError>,
        problem_type: Option<&'a str>,
        logger: Option<&'a mut Logger>,
    ) -> Self {
        Self {
            params,
            default_response,
            default_error,
            problem_type: problem_type.unwrap_or(ABOUT_BLANK),
            logger,
        }
    }

    /// All path parameters bound for this request.
    pub fn params(&self) -> &PathParams {
        &self.params
    }

    /// The value bound to placeholder `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// The `type` used for structured error bodies of this request.
    pub fn problem_type(&self) -> &str {
        self.problem_type
    }

    pub fn has_default_response(&self) -> bool {
        self.default_response.is_some()
    }

    pub fn has_default_error(&self) -> bool {
        self.default_error.is_some()
    }

    /// Write the route's default response body.
    ///
    /// Fails with [`Error::NoDefaultResponse`] without writing anything when
    /// the route has none.
    pub fn write_default_response(&self, writer: &mut ResponseWriter) -> Result<usize, Error> {
        let body = self.default_response.ok_or(Error::NoDefaultResponse)?;
        Ok(writer.write(body))
    }

    /// Write the route's default error as a structured error body.
    ///
    /// Fails with [`Error::NoDefaultErrorResponse`] without writing anything
    /// when the route has none.
    pub fn write_default_error_response(&self, writer: &mut ResponseWriter) -> Result<usize, Error> {
        let default = self.default_error.ok_or(Error::NoDefaultErrorResponse)?;
        writer.error(default.status, &default.detail, self.problem_type)
    }

    /// The router's logger, if one is attached.
    pub fn logger(&mut self) -> Option<&mut Logger> {
        self.logger.as_deref_mut()
    }
}
