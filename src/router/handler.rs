//! Per-route handler tables.

use std::collections::HashMap;
use std::fmt;

use crate::http::{Method, Request, StatusCode};
use crate::logger::Logger;
use crate::router::context::{Context, DefaultError};
use crate::router::error::Error;
use crate::router::pattern::{PathParams, RoutePattern};
use crate::router::response::ResponseWriter;
use crate::router::Serve;

/// Type alias for a handler function.
///
/// Handlers write their response through the [`ResponseWriter`] and read
/// path parameters and default responses from the [`Context`].
pub type HandlerFn = Box<dyn Fn(&mut ResponseWriter, &Request, &mut Context<'_>) -> Result<(), Error> + Send + Sync>;

/// The handlers of one route, keyed by method.
///
/// ```
/// use cgiroute_rs::{Method, RouteHandler, StatusCode};
///
/// let handler = RouteHandler::new()
///     .with_default_response("Hello World!!")
///     .with_default_error("greeting not found", StatusCode::NOT_FOUND)
///     .method_handler(Method::GET, |w, _req, ctx| {
///         ctx.write_default_response(w)?;
///         Ok(())
///     });
/// assert!(handler.handles(&Method::GET));
/// ```
#[derive(Default)]
pub struct RouteHandler {
    route: Option<RoutePattern>,
    handlers: HashMap<Method, HandlerFn>,
    default_response: Option<Vec<u8>>,
    default_error: Option<DefaultError>,
}

impl RouteHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a route pattern for serving this handler without a router.
    pub fn with_route(mut self, pattern: &str) -> Result<Self, Error> {
        self.route = Some(RoutePattern::parse(pattern)?);
        Ok(self)
    }

    pub(crate) fn set_route(&mut self, pattern: RoutePattern) {
        self.route = Some(pattern);
    }

    /// The bound route pattern.
    pub fn route(&self) -> Option<&RoutePattern> {
        self.route.as_ref()
    }

    /// Register `handler` for `method`, replacing any earlier one.
    pub fn method_handler<F>(mut self, method: Method, handler: F) -> Self
    where
        F: Fn(&mut ResponseWriter, &Request, &mut Context<'_>) -> Result<(), Error> + Send + Sync + 'static,
    {
        if self.handlers.insert(method.clone(), Box::new(handler)).is_some() {
            log::debug!("replaced {method} handler");
        }
        self
    }

    /// Configure the body written by [`Context::write_default_response`].
    ///
    /// An empty body leaves the default response unset.
    pub fn with_default_response(mut self, body: impl Into<Vec<u8>>) -> Self {
        let body = body.into();
        self.default_response = (!body.is_empty()).then_some(body);
        self
    }

    /// Configure the error written by [`Context::write_default_error_response`].
    pub fn with_default_error(mut self, err: impl fmt::Display, status: StatusCode) -> Self {
        self.default_error = Some(DefaultError {
            detail: err.to_string(),
            status,
        });
        self
    }

    pub fn default_response(&self) -> Option<&[u8]> {
        self.default_response.as_deref()
    }

    pub fn default_error(&self) -> Option<&DefaultError> {
        self.default_error.as_ref()
    }

    /// Whether a handler is registered for `method`.
    pub fn handles(&self, method: &Method) -> bool {
        self.handlers.contains_key(method)
    }

    /// Registered methods, sorted by name.
    pub fn methods(&self) -> Vec<&Method> {
        let mut methods: Vec<&Method> = self.handlers.keys().collect();
        methods.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        methods
    }

    /// Serve `request` with the handler registered for its method.
    ///
    /// Path parameters come from the bound route; they are empty when no
    /// route is bound or the path does not match it. A request whose method
    /// has no handler fails with [`Error::MethodNotAllowed`] and writes nothing.
    /// A status or headers set without a body are emitted on success.
    pub fn serve(&self, request: &Request, writer: &mut ResponseWriter) -> Result<(), Error> {
        let params = match &self.route {
            Some(route) => route.matches(request.route_path()).unwrap_or_else(|| {
                log::debug!("path {} does not match route {route}", request.route_path());
                PathParams::new()
            }),
            None => PathParams::new(),
        };
        self.dispatch(params, request, writer, None)?;
        writer.finish();
        Ok(())
    }

    /// Invoke the handler for `request.method` with an already-extracted
    /// parameter set.
    pub(crate) fn dispatch(
        &self,
        params: PathParams,
        request: &Request,
        writer: &mut ResponseWriter,
        logger: Option<&mut Logger>,
    ) -> Result<(), Error> {
        let handler = self.handlers.get(&request.method).ok_or_else(|| {
            Error::MethodNotAllowed(request.method.clone(), request.route_path().to_string())
        })?;

        let mut ctx = Context::new(
            params,
            self.default_response.as_deref(),
            self.default_error.as_ref(),
            request.full_url.as_deref(),
            logger,
        );
        handler(writer, request, &mut ctx)
    }
}

impl Serve for RouteHandler {
    fn serve(&mut self, request: &Request, writer: &mut ResponseWriter) -> Result<(), Error> {
        RouteHandler::serve(self, request, writer)
    }
}

impl fmt::Debug for RouteHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteHandler")
            .field("route", &self.route)
            .field("methods", &self.methods())
            .field("default_response", &self.default_response.as_ref().map(Vec::len))
            .field("default_error", &self.default_error)
            .finish()
    }
}
