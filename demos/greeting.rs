//! A CGI program routing `/greeting/{type}` requests.
//!
//! Run it the way a CGI host would:
//!
//! ```text
//! REQUEST_METHOD=GET X_MATCHED_ROUTE=/greeting/hello cargo run --example greeting
//! ```

use cgiroute_rs::{cgi, Level, Logger, Method, RouteHandler, Router, StatusCode};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let greeting = RouteHandler::new()
        .with_default_error("unknown greeting type", StatusCode::NOT_FOUND)
        .method_handler(Method::GET, |w, _req, ctx| {
            match ctx.param("type") {
                Some("hello") => {
                    w.write(b"Hello World!!\n");
                }
                Some("goodbye") => {
                    w.write(b"Goodbye for now!!!\n");
                }
                _ => {
                    ctx.write_default_error_response(w)?;
                }
            }
            Ok(())
        });

    let files = RouteHandler::new().method_handler(Method::GET, |w, _req, ctx| {
        let name = ctx.param("name").unwrap_or_default();
        let path = std::path::Path::new("static").join(name);
        // Failures are already answered with a structured error body
        let _ = cgiroute_rs::serve_file(w, "", path, ctx.problem_type());
        Ok(())
    });

    let mut router = Router::new().with_logger(Logger::stderr(Level::Info));
    router
        .handle("/greeting/{type}", greeting)?
        .handle("/static/{name}", files)?;

    let routes = router.routes().len() as u64;
    router.logger().key("startup").val("routes", routes).info("serving request")?;

    if let Err(e) = cgi::serve(&mut router) {
        log::debug!("request finished with error: {e}");
    }
    Ok(())
}
