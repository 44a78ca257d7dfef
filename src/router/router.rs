//! Pattern-based request router.

use crate::http::{Request, StatusCode};
use crate::logger::{Level, Logger};
use crate::router::error::Error;
use crate::router::handler::RouteHandler;
use crate::router::pattern::{PathParams, RoutePattern};
use crate::router::response::ResponseWriter;
use crate::router::Serve;

/// Dispatches requests to the [`RouteHandler`] whose pattern matches the path.
///
/// When several patterns match, the one with the most literal segments wins,
/// so `/a/b` beats `/a/{x}`. Patterns with equally many literals are tried in
/// registration order.
#[derive(Debug, Default)]
pub struct Router {
    routes: Vec<RouteHandler>,
    logger: Option<Logger>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `pattern`.
    ///
    /// Registering the same pattern again replaces the earlier handler but
    /// keeps its registration position.
    pub fn handle(&mut self, pattern: &str, mut handler: RouteHandler) -> Result<&mut Self, Error> {
        let route = RoutePattern::parse(pattern)?;
        handler.set_route(route);

        let existing = self
            .routes
            .iter()
            .position(|h| h.route().map(RoutePattern::as_str) == Some(pattern));
        match existing {
            Some(i) => {
                log::warn!("replacing handler for route {pattern}");
                self.routes[i] = handler;
            }
            None => {
                log::debug!("registered route {pattern}");
                self.routes.push(handler);
            }
        }
        Ok(self)
    }

    /// Attach `logger`, replacing any attached one.
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Attach a logger writing `Info` and above to standard error.
    pub fn with_default_logger(self) -> Self {
        self.with_logger(Logger::default())
    }

    /// The attached logger, attaching the default one first if there is none.
    pub fn logger(&mut self) -> &mut Logger {
        self.logger.get_or_insert_with(Logger::default)
    }

    /// Registered route handlers in registration order.
    pub fn routes(&self) -> &[RouteHandler] {
        &self.routes
    }

    /// The route handler registered for the literal `pattern`.
    pub fn route(&self, pattern: &str) -> Option<&RouteHandler> {
        self.routes
            .iter()
            .find(|h| h.route().map(RoutePattern::as_str) == Some(pattern))
    }

    /// Find the most specific route matching `path`.
    fn find<'r>(routes: &'r [RouteHandler], path: &str) -> Option<(&'r RouteHandler, PathParams)> {
        let mut best: Option<(&RouteHandler, PathParams, usize)> = None;
        for handler in routes {
            let Some(route) = handler.route() else {
                continue;
            };
            let Some(params) = route.matches(path) else {
                continue;
            };
            let literals = route.literal_count();
            if best.as_ref().map_or(true, |(_, _, most)| literals > *most) {
                best = Some((handler, params, literals));
            }
        }
        best.map(|(handler, params, _)| (handler, params))
    }

    /// Serve `request`.
    ///
    /// Routing failures are answered with structured error bodies: 404 when no
    /// pattern matches, 405 with an `Allow` header when the matched route has
    /// no handler for the method. A failing handler gets a 500 unless it
    /// already started its response. The error is returned in every case.
    pub fn serve(&mut self, request: &Request, writer: &mut ResponseWriter) -> Result<(), Error> {
        let path = request.route_path();
        let problem_type = request.full_url.as_deref().unwrap_or_default();

        let Some((handler, params)) = Self::find(&self.routes, path) else {
            log::info!("no route matches {} {path}", request.method);
            if let Some(logger) = self.logger.as_mut() {
                let logged = logger
                    .level(Level::Warn)
                    .key("route")
                    .msg("no route matches path")
                    .val("method", request.method.as_str())
                    .val("path", path)
                    .log();
                if let Err(e) = logged {
                    log::warn!("failed to write log record: {e}");
                }
            }
            writer.error(StatusCode::NOT_FOUND, &format!("no route matches path {path}"), problem_type)?;
            return Err(Error::NotFound(path.to_string()));
        };

        log::debug!(
            "dispatching {} {path} to {}",
            request.method,
            handler.route().map(RoutePattern::as_str).unwrap_or_default()
        );

        let result = handler.dispatch(params, request, writer, self.logger.as_mut());
        let Err(err) = result else {
            writer.finish();
            return Ok(());
        };

        log::error!("error serving {} {path}: {err}", request.method);
        if let Some(logger) = self.logger.as_mut() {
            let logged = logger
                .level(Level::Error)
                .key("route")
                .err(&err)
                .val("method", request.method.as_str())
                .val("path", path)
                .log();
            if let Err(e) = logged {
                log::warn!("failed to write log record: {e}");
            }
        }

        if !writer.is_written() {
            match &err {
                Error::MethodNotAllowed(method, _) => {
                    let allowed = handler
                        .methods()
                        .iter()
                        .map(|m| m.as_str())
                        .collect::<Vec<&str>>()
                        .join(", ");
                    writer.headers_mut().set("Allow", allowed);
                    writer.error(
                        StatusCode::METHOD_NOT_ALLOWED,
                        &format!("method {method} not allowed for path {path}"),
                        problem_type,
                    )?;
                }
                _ => {
                    writer.error(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string(), problem_type)?;
                }
            }
        }

        Err(err)
    }
}

impl Serve for Router {
    fn serve(&mut self, request: &Request, writer: &mut ResponseWriter) -> Result<(), Error> {
        Router::serve(self, request, writer)
    }
}
