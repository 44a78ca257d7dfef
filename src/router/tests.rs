//! Tests for routing, dispatch and response composition.

#[cfg(test)]
mod router_tests {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    use crate::http::{Headers, HttpVersion, Method, Request, StatusCode};
    use crate::logger::{Level, Logger};
    use crate::router::{
        compose, match_path, problem_body, serve_file, Error, ProblemDetails, ResponseWriter, RouteHandler,
        RoutePattern, Router, Segment, Serve, PROBLEM_JSON,
    };

    // In-memory log sink that stays readable after the logger takes it
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn body_of(response: &ResponseWriter) -> String {
        let text = String::from_utf8_lossy(response.as_bytes()).to_string();
        match text.split_once("\n\n") {
            Some((_, body)) => body.to_string(),
            None => String::new(),
        }
    }

    fn greeting_handler() -> RouteHandler {
        RouteHandler::new().method_handler(Method::GET, |w, _req, ctx| {
            match ctx.param("type") {
                Some("hello") => w.write(b"Hello World!!\n"),
                Some("goodbye") => w.write(b"Goodbye for now!!!\n"),
                _ => w.write(b"unknown greeting\n"),
            };
            Ok(())
        })
    }

    #[test]
    fn test_pattern_parsing() {
        let pattern = RoutePattern::parse("/greeting/{type}/{lang}").unwrap();
        assert_eq!(pattern.as_str(), "/greeting/{type}/{lang}");
        assert_eq!(pattern.segments()[1], Segment::Literal("greeting".to_string()));
        assert_eq!(pattern.segments()[2], Segment::Param("type".to_string()));
        assert_eq!(pattern.param_names().collect::<Vec<_>>(), vec!["type", "lang"]);
        assert_eq!(pattern.literal_count(), 2);
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(matches!(RoutePattern::parse(""), Err(Error::InvalidPattern { .. })));
        assert!(matches!(RoutePattern::parse("/a/{}"), Err(Error::InvalidPattern { .. })));
        assert!(matches!(RoutePattern::parse("/a/x{id}"), Err(Error::InvalidPattern { .. })));
        assert!(matches!(
            RoutePattern::parse("/{id}/b/{id}"),
            Err(Error::DuplicateParameter { ref name, .. }) if name == "id"
        ));
    }

    #[test]
    fn test_pattern_binds_every_placeholder_once() {
        let pattern: RoutePattern = "/users/{user}/posts/{post}".parse().unwrap();
        let params = pattern.matches("/users/42/posts/hello-world").unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params["user"], "42");
        assert_eq!(params["post"], "hello-world");
    }

    #[test]
    fn test_pattern_literals_are_case_sensitive() {
        let pattern: RoutePattern = "/Users/{id}".parse().unwrap();
        assert!(pattern.matches("/Users/1").is_some());
        assert!(pattern.matches("/users/1").is_none());
    }

    #[test]
    fn test_pattern_without_placeholders_is_exact() {
        let pattern: RoutePattern = "/test/route".parse().unwrap();
        assert_eq!(pattern.matches("/test/route").unwrap().len(), 0);
        assert!(pattern.matches("/test/other").is_none());
        assert!(pattern.matches("/test/route/").is_none());
    }

    #[test]
    fn test_match_path_segment_count_mismatch() {
        let (matched, params) = match_path("/greeting/{type}", "/greeting/hello/extra");
        assert!(!matched);
        assert!(params.is_empty());

        let (matched, params) = match_path("/greeting/{type}", "/greeting");
        assert!(!matched);
        assert!(params.is_empty());

        let (matched, params) = match_path("/greeting/{type}", "/greeting/hello");
        assert!(matched);
        assert_eq!(params["type"], "hello");
    }

    #[test]
    fn test_match_path_literal_mismatch_clears_params() {
        let (matched, params) = match_path("/{a}/b", "/x/c");
        assert!(!matched);
        assert!(params.is_empty());
    }

    #[test]
    fn test_compose_exact_bytes() {
        let mut headers = Headers::new();
        headers.set("Content-Type", "text/plain");
        let bytes = compose(HttpVersion::Http11, StatusCode::OK, &headers, b"hello");
        assert_eq!(bytes, b"HTTP/1.1 200 OK\nContent-Type: text/plain\n\nhello");
    }

    #[test]
    fn test_compose_joins_multi_value_headers() {
        let mut headers = Headers::new();
        headers.add("Content-Type", "text/html");
        headers.add("Content-Type", "charset=utf-8");
        headers.add("Cache-Control", "no-cache");
        headers.add("Cache-Control", "no-store");
        let bytes = compose(HttpVersion::Http10, StatusCode::NOT_FOUND, &headers, b"");
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "HTTP/1.0 404 Not Found\nContent-Type: text/html; charset=utf-8\nCache-Control: no-cache, no-store\n\n"
        );
    }

    #[test]
    fn test_writer_defaults_status_and_sniffs_content_type() {
        let mut response = ResponseWriter::default();
        assert_eq!(response.status(), None);

        response.write(b"<html><body>hi</body></html>");
        assert_eq!(response.status(), Some(StatusCode::OK));
        assert_eq!(response.headers().get("Content-Type"), Some("text/html; charset=utf-8"));
        assert!(String::from_utf8_lossy(response.as_bytes()).starts_with("HTTP/1.1 200 OK\n"));
    }

    #[test]
    fn test_writer_repeated_writes_do_not_repeat_status_line() {
        let mut response = ResponseWriter::new(HttpVersion::Http11);
        response.headers_mut().set("Content-Type", "text/plain");
        response.write(b"hello");
        response.write(b"hello");

        let text = String::from_utf8(response.into_bytes()).unwrap();
        assert_eq!(text, "HTTP/1.1 200 OK\nContent-Type: text/plain\n\nhellohello");
        assert_eq!(text.matches("HTTP/1.1").count(), 1);
    }

    #[test]
    fn test_writer_status_is_fixed_once_set() {
        let mut response = ResponseWriter::default();
        response.write_header(StatusCode::CREATED);
        response.write_header(StatusCode::ACCEPTED);
        response.write(b"done");

        assert_eq!(response.status(), Some(StatusCode::CREATED));
        assert!(String::from_utf8_lossy(response.as_bytes()).starts_with("HTTP/1.1 201 Created\n"));
    }

    #[test]
    fn test_writer_supports_io_write() {
        let mut response = ResponseWriter::default();
        writeln!(response, "Hello {}", "World").unwrap();
        assert_eq!(body_of(&response), "Hello World\n");
    }

    #[test]
    fn test_writer_json() {
        let mut response = ResponseWriter::default();
        response.json(&serde_json::json!({ "ok": true })).unwrap();
        assert_eq!(response.headers().get("Content-Type"), Some("application/json"));
        assert_eq!(body_of(&response), r#"{"ok":true}"#);
    }

    #[test]
    fn test_problem_body_format() {
        let body = problem_body("missing thing", StatusCode::NOT_FOUND, "https://example.com/x").unwrap();
        assert_eq!(
            String::from_utf8(body.clone()).unwrap(),
            r#"{ "type": "https://example.com/x", "detail": "missing thing", "status": 404 }"#
        );

        let problem: ProblemDetails = serde_json::from_slice(&body).unwrap();
        assert_eq!(problem.status, 404);

        let body = problem_body("quote \" inside", StatusCode::BAD_REQUEST, "").unwrap();
        let problem: ProblemDetails = serde_json::from_slice(&body).unwrap();
        assert_eq!(problem.type_uri, "about:blank");
        assert_eq!(problem.detail, "quote \" inside");
    }

    #[test]
    fn test_writer_error_sets_problem_content_type() {
        let mut response = ResponseWriter::default();
        response.error(StatusCode::BAD_GATEWAY, "upstream failed", "about:blank").unwrap();

        let text = String::from_utf8_lossy(response.as_bytes()).to_string();
        assert!(text.starts_with("HTTP/1.1 502 Bad Gateway\n"));
        assert!(text.contains(&format!("Content-Type: {PROBLEM_JSON}\n")));
        assert!(text.contains("\"status\": 502"));
    }

    #[test]
    fn test_router_path_parameters() {
        let mut router = Router::new();
        router.handle("/greeting/{type}", greeting_handler()).unwrap();

        let request = Request::get("/greeting/hello");
        let mut response = ResponseWriter::new(request.version);
        router.serve(&request, &mut response).unwrap();
        assert_eq!(body_of(&response), "Hello World!!\n");

        let request = Request::get("/greeting/goodbye?loud=1");
        let mut response = ResponseWriter::new(request.version);
        router.serve(&request, &mut response).unwrap();
        assert_eq!(body_of(&response), "Goodbye for now!!!\n");
    }

    #[test]
    fn test_handler_observes_params() {
        let seen = Arc::new(Mutex::new(None));
        let seen_in_handler = seen.clone();

        let handler = RouteHandler::new().method_handler(Method::GET, move |_w, _req, ctx| {
            *seen_in_handler.lock().unwrap() = Some(ctx.params().clone());
            Ok(())
        });

        let mut router = Router::new();
        router.handle("/greeting/{type}", handler).unwrap();
        router
            .serve(&Request::get("/greeting/hello"), &mut ResponseWriter::default())
            .unwrap();

        let params = seen.lock().unwrap().clone().unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params["type"], "hello");
    }

    #[test]
    fn test_router_not_found() {
        let mut router = Router::new();
        router.handle("/greeting/{type}", greeting_handler()).unwrap();

        let request = Request::get("/greeting/unknown/path-shape");
        let mut response = ResponseWriter::new(request.version);
        let result = router.serve(&request, &mut response);

        assert!(matches!(result, Err(Error::NotFound(ref p)) if p == "/greeting/unknown/path-shape"));
        let text = String::from_utf8_lossy(response.as_bytes()).to_string();
        assert!(text.starts_with("HTTP/1.1 404 Not Found\n"));
        assert!(text.contains("Content-Type: application/problem+json\n"));
        assert!(text.contains("\"status\": 404"));
    }

    #[test]
    fn test_router_not_found_uses_full_url_as_problem_type() {
        let mut router = Router::new();
        let request = Request::get("/nope").with_full_url("https://example.com/nope");
        let mut response = ResponseWriter::default();
        let _ = router.serve(&request, &mut response);

        let problem: ProblemDetails = serde_json::from_str(&body_of(&response)).unwrap();
        assert_eq!(problem.type_uri, "https://example.com/nope");
        assert_eq!(problem.status, 404);
    }

    #[test]
    fn test_router_method_not_allowed() {
        let handler = RouteHandler::new()
            .method_handler(Method::GET, |w, _req, _ctx| {
                w.write(b"get");
                Ok(())
            })
            .method_handler(Method::DELETE, |w, _req, _ctx| {
                w.write(b"delete");
                Ok(())
            });

        let mut router = Router::new();
        router.handle("/test/route", handler).unwrap();

        let request = Request::new(Method::POST, "/test/route", HttpVersion::Http11, Default::default());
        let mut response = ResponseWriter::default();
        let result = router.serve(&request, &mut response);

        assert!(matches!(result, Err(Error::MethodNotAllowed(Method::POST, ref p)) if p == "/test/route"));
        let text = String::from_utf8_lossy(response.as_bytes()).to_string();
        assert!(text.starts_with("HTTP/1.1 405 Method Not Allowed\n"));
        assert!(text.contains("Allow: DELETE, GET\n"));
        assert!(text.contains("\"status\": 405"));
    }

    #[test]
    fn test_router_dispatches_by_method() {
        let handler = RouteHandler::new()
            .method_handler(Method::GET, |w, _req, _ctx| {
                w.write(b"hello\n");
                Ok(())
            })
            .method_handler(Method::DELETE, |w, _req, _ctx| {
                w.write(b"goodbye\n");
                Ok(())
            });

        let mut router = Router::new();
        router.handle("/test/route", handler).unwrap();

        let request = Request::new(Method::DELETE, "/test/route", HttpVersion::Http11, Default::default());
        let mut response = ResponseWriter::default();
        router.serve(&request, &mut response).unwrap();
        assert_eq!(body_of(&response), "goodbye\n");
    }

    #[test]
    fn test_extension_method_handler() {
        let purge = Method::Extension("PURGE".to_string());
        let handler = RouteHandler::new().method_handler(purge.clone(), |w, _req, _ctx| {
            w.write_header(StatusCode::NO_CONTENT);
            w.write(b"");
            Ok(())
        });

        let mut router = Router::new();
        router.handle("/cache", handler).unwrap();

        let request = Request::new(purge, "/cache", HttpVersion::Http11, Default::default());
        let mut response = ResponseWriter::default();
        router.serve(&request, &mut response).unwrap();
        assert!(String::from_utf8_lossy(response.as_bytes()).starts_with("HTTP/1.1 204 No Content\n"));
    }

    #[test]
    fn test_literal_route_beats_placeholder_route() {
        let mut router = Router::new();
        router
            .handle("/a/{x}", RouteHandler::new().method_handler(Method::GET, |w, _req, _ctx| {
                w.write(b"placeholder");
                Ok(())
            }))
            .unwrap()
            .handle("/a/b", RouteHandler::new().method_handler(Method::GET, |w, _req, _ctx| {
                w.write(b"literal");
                Ok(())
            }))
            .unwrap();

        let mut response = ResponseWriter::default();
        router.serve(&Request::get("/a/b"), &mut response).unwrap();
        assert_eq!(body_of(&response), "literal");

        let mut response = ResponseWriter::default();
        router.serve(&Request::get("/a/c"), &mut response).unwrap();
        assert_eq!(body_of(&response), "placeholder");
    }

    #[test]
    fn test_equally_specific_routes_use_registration_order() {
        let mut router = Router::new();
        router
            .handle("/{x}/b", RouteHandler::new().method_handler(Method::GET, |w, _req, _ctx| {
                w.write(b"first");
                Ok(())
            }))
            .unwrap()
            .handle("/a/{y}", RouteHandler::new().method_handler(Method::GET, |w, _req, _ctx| {
                w.write(b"second");
                Ok(())
            }))
            .unwrap();

        let mut response = ResponseWriter::default();
        router.serve(&Request::get("/a/b"), &mut response).unwrap();
        assert_eq!(body_of(&response), "first");
    }

    #[test]
    fn test_reregistering_pattern_replaces_handler() {
        let mut router = Router::new();
        router.handle("/x", RouteHandler::new()).unwrap();
        router
            .handle("/x", RouteHandler::new().method_handler(Method::GET, |_w, _req, _ctx| Ok(())))
            .unwrap();

        assert_eq!(router.routes().len(), 1);
        assert!(router.route("/x").unwrap().handles(&Method::GET));
    }

    #[test]
    fn test_handler_error_becomes_500() {
        let handler = RouteHandler::new().method_handler(Method::GET, |_w, _req, _ctx| {
            Err(Error::InternalError("database unavailable".to_string()))
        });
        let mut router = Router::new();
        router.handle("/fail", handler).unwrap();

        let mut response = ResponseWriter::default();
        let result = router.serve(&Request::get("/fail"), &mut response);

        assert!(matches!(result, Err(Error::InternalError(_))));
        let text = String::from_utf8_lossy(response.as_bytes()).to_string();
        assert!(text.starts_with("HTTP/1.1 500 Internal Server Error\n"));
        assert!(text.contains("database unavailable"));
    }

    #[test]
    fn test_handler_error_after_write_keeps_response() {
        let handler = RouteHandler::new().method_handler(Method::GET, |w, _req, _ctx| {
            w.write(b"partial");
            Err(Error::InternalError("late failure".to_string()))
        });
        let mut router = Router::new();
        router.handle("/late", handler).unwrap();

        let mut response = ResponseWriter::default();
        assert!(router.serve(&Request::get("/late"), &mut response).is_err());
        assert_eq!(body_of(&response), "partial");
    }

    #[test]
    fn test_default_response() {
        let handler = RouteHandler::new()
            .with_default_response("Hello World!!")
            .method_handler(Method::GET, |w, _req, ctx| {
                ctx.write_default_response(w)?;
                Ok(())
            });

        let mut router = Router::new();
        router.handle("/hello", handler).unwrap();

        let mut response = ResponseWriter::default();
        router.serve(&Request::get("/hello"), &mut response).unwrap();
        assert_eq!(
            String::from_utf8(response.into_bytes()).unwrap(),
            "HTTP/1.1 200 OK\nContent-Type: text/plain; charset=utf-8\n\nHello World!!"
        );
    }

    #[test]
    fn test_missing_default_response_writes_nothing() {
        let outcome = Arc::new(Mutex::new(None));
        let outcome_in_handler = outcome.clone();

        let handler = RouteHandler::new().method_handler(Method::GET, move |w, _req, ctx| {
            let result = ctx.write_default_response(w);
            *outcome_in_handler.lock().unwrap() = Some(matches!(result, Err(Error::NoDefaultResponse)));
            assert!(!w.is_written());
            Ok(())
        });

        let mut response = ResponseWriter::default();
        handler.serve(&Request::get("/"), &mut response).unwrap();

        assert_eq!(*outcome.lock().unwrap(), Some(true));
        assert!(response.as_bytes().is_empty());
    }

    #[test]
    fn test_empty_default_response_counts_as_unset() {
        let handler = RouteHandler::new().with_default_response(Vec::new());
        assert!(handler.default_response().is_none());
    }

    #[test]
    fn test_default_error_response() {
        let handler = RouteHandler::new()
            .with_default_error("this is a test error", StatusCode::BAD_REQUEST)
            .method_handler(Method::GET, |w, _req, ctx| {
                ctx.write_default_error_response(w)?;
                Ok(())
            });

        let request = Request::get("/test/route").with_full_url("http://localhost:3000/test/route");
        let mut response = ResponseWriter::default();
        handler.serve(&request, &mut response).unwrap();

        let text = String::from_utf8_lossy(response.as_bytes()).to_string();
        assert!(text.starts_with("HTTP/1.1 400 Bad Request\n"));
        assert!(text.contains("Content-Type: application/problem+json\n"));
        let problem: ProblemDetails = serde_json::from_str(&body_of(&response)).unwrap();
        assert_eq!(
            problem,
            ProblemDetails {
                type_uri: "http://localhost:3000/test/route".to_string(),
                detail: "this is a test error".to_string(),
                status: 400,
            }
        );
    }

    #[test]
    fn test_missing_default_error_response() {
        let handler = RouteHandler::new().method_handler(Method::GET, |w, _req, ctx| {
            assert!(!ctx.has_default_error());
            ctx.write_default_error_response(w)?;
            Ok(())
        });

        let mut response = ResponseWriter::default();
        let result = handler.serve(&Request::get("/"), &mut response);
        assert!(matches!(result, Err(Error::NoDefaultErrorResponse)));
        assert!(response.as_bytes().is_empty());
    }

    #[test]
    fn test_standalone_handler_uses_bound_route() {
        let mut handler = greeting_handler().with_route("/greeting/{type}").unwrap();

        let mut response = ResponseWriter::default();
        Serve::serve(&mut handler, &Request::get("/greeting/goodbye"), &mut response).unwrap();
        assert_eq!(body_of(&response), "Goodbye for now!!!\n");
    }

    #[test]
    fn test_standalone_handler_without_match_has_no_params() {
        let handler = greeting_handler().with_route("/greeting/{type}").unwrap();

        let mut response = ResponseWriter::default();
        handler.serve(&Request::get("/other"), &mut response).unwrap();
        assert_eq!(body_of(&response), "unknown greeting\n");
    }

    #[test]
    fn test_standalone_handler_missing_method_writes_nothing() {
        let handler = greeting_handler();
        let request = Request::new(Method::PUT, "/greeting/hello", HttpVersion::Http11, Default::default());
        let mut response = ResponseWriter::default();

        let result = handler.serve(&request, &mut response);
        assert!(matches!(result, Err(Error::MethodNotAllowed(Method::PUT, _))));
        assert!(response.as_bytes().is_empty());
    }

    #[test]
    fn test_router_logger_defaults() {
        let mut router = Router::new();
        assert_eq!(router.logger().min_level(), Level::Info);

        let sink = SharedBuf::default();
        let mut router = Router::new().with_logger(Logger::new(Level::Warn, sink.clone()));
        assert_eq!(router.logger().min_level(), Level::Warn);

        let mut router = Router::new().with_default_logger();
        assert!(!router.logger().is_accumulating());
    }

    #[test]
    fn test_router_logs_routing_failures() {
        let sink = SharedBuf::default();
        let mut router = Router::new().with_logger(Logger::new(Level::Info, sink.clone()));

        let _ = router.serve(&Request::get("/missing"), &mut ResponseWriter::default());

        let contents = sink.contents();
        assert_eq!(contents.lines().count(), 1);
        let line: serde_json::Value = serde_json::from_str(contents.trim_end()).unwrap();
        assert_eq!(line["level"], "warn");
        assert_eq!(line["path"], "/missing");
    }

    #[test]
    fn test_handler_can_use_router_logger() {
        let sink = SharedBuf::default();
        let mut router = Router::new().with_logger(Logger::new(Level::Info, sink.clone()));
        router
            .handle("/items/{id}", RouteHandler::new().method_handler(Method::GET, |w, _req, ctx| {
                let id = ctx.param("id").unwrap_or_default().to_string();
                if let Some(logger) = ctx.logger() {
                    logger.key("items").val("id", id).info("fetched").unwrap();
                }
                w.write(b"ok");
                Ok(())
            }))
            .unwrap();

        router.serve(&Request::get("/items/7"), &mut ResponseWriter::default()).unwrap();

        let line: serde_json::Value = serde_json::from_str(sink.contents().trim_end()).unwrap();
        assert_eq!(line["key"], "items");
        assert_eq!(line["message"], "fetched");
        assert_eq!(line["id"], "7");
    }

    #[test]
    fn test_serve_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        std::fs::write(&path, "<html></html>").unwrap();

        let mut response = ResponseWriter::default();
        let written = serve_file(&mut response, "text/html", &path, "").unwrap();
        assert_eq!(written, 13);
        assert_eq!(response.headers().get("Content-Type"), Some("text/html"));
        assert_eq!(body_of(&response), "<html></html>");

        let mut response = ResponseWriter::default();
        serve_file(&mut response, "", &path, "").unwrap();
        assert_eq!(response.headers().get("Content-Type"), Some("application/octet-stream"));
    }

    #[test]
    fn test_serve_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        let mut response = ResponseWriter::default();
        let result = serve_file(&mut response, "text/plain", &path, "");
        assert!(matches!(result, Err(Error::FileNotFound(ref p)) if *p == path));

        let problem: ProblemDetails = serde_json::from_str(&body_of(&response)).unwrap();
        assert_eq!(problem.status, 404);
        assert_eq!(response.headers().get("Content-Type"), Some(PROBLEM_JSON));
    }

    #[test]
    fn test_serve_file_empty_path() {
        let mut response = ResponseWriter::default();
        let result = serve_file(&mut response, "", "", "");
        assert!(matches!(result, Err(Error::FileNotFound(_))));

        let problem: ProblemDetails = serde_json::from_str(&body_of(&response)).unwrap();
        assert_eq!(problem.detail, "no path to file provided");
        assert_eq!(problem.status, 404);
    }

    #[test]
    fn test_serve_file_io_failure() {
        // Reading a directory as a file fails with something other than NotFound
        let dir = tempfile::tempdir().unwrap();

        let mut response = ResponseWriter::default();
        let result = serve_file(&mut response, "", dir.path(), "");
        assert!(matches!(result, Err(Error::FileIo { .. })));

        let problem: ProblemDetails = serde_json::from_str(&body_of(&response)).unwrap();
        assert_eq!(problem.status, 500);
    }

    #[test]
    fn test_redirect_without_body_emits_head() {
        let handler = RouteHandler::new().method_handler(Method::GET, |w, _req, _ctx| {
            w.headers_mut().set("Location", "/greeting/hello");
            w.write_header(StatusCode::FOUND);
            Ok(())
        });
        let mut router = Router::new();
        router.handle("/old", handler).unwrap();

        let mut response = ResponseWriter::default();
        router.serve(&Request::get("/old"), &mut response).unwrap();

        assert_eq!(
            String::from_utf8_lossy(response.as_bytes()),
            "HTTP/1.1 302 Found\nLocation: /greeting/hello\n\n"
        );
    }

    #[test]
    fn test_standalone_no_content_emits_head() {
        let handler = RouteHandler::new().method_handler(Method::DELETE, |w, _req, _ctx| {
            w.write_header(StatusCode::NO_CONTENT);
            Ok(())
        });

        let request = Request::new(Method::DELETE, "/item", HttpVersion::Http11, Default::default());
        let mut response = ResponseWriter::default();
        handler.serve(&request, &mut response).unwrap();

        assert_eq!(String::from_utf8_lossy(response.as_bytes()), "HTTP/1.1 204 No Content\n\n");
    }

    #[test]
    fn test_finish_leaves_untouched_writer_empty() {
        let mut response = ResponseWriter::default();
        response.finish();
        assert!(response.as_bytes().is_empty());
        assert!(!response.is_written());

        response.write(b"body");
        response.finish();
        assert_eq!(body_of(&response), "body");
    }

    #[test]
    fn test_handler_error_replaces_pending_status() {
        let handler = RouteHandler::new().method_handler(Method::GET, |w, _req, _ctx| {
            w.write_header(StatusCode::CREATED);
            Err(Error::InternalError("boom".to_string()))
        });
        let mut router = Router::new();
        router.handle("/create", handler).unwrap();

        let mut response = ResponseWriter::default();
        let result = router.serve(&Request::get("/create"), &mut response);

        assert!(matches!(result, Err(Error::InternalError(_))));
        assert_eq!(response.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        let text = String::from_utf8_lossy(response.as_bytes()).to_string();
        assert!(text.starts_with("HTTP/1.1 500 Internal Server Error\nContent-Type: application/problem+json\n"));
        let problem: ProblemDetails = serde_json::from_str(&body_of(&response)).unwrap();
        assert_eq!(problem.status, 500);
    }

    #[test]
    fn test_default_error_replaces_pending_status() {
        let handler = RouteHandler::new()
            .with_default_error("Invalid type", StatusCode::BAD_REQUEST)
            .method_handler(Method::GET, |w, _req, ctx| {
                w.write_header(StatusCode::OK);
                ctx.write_default_error_response(w)?;
                Ok(())
            });

        let mut response = ResponseWriter::default();
        handler.serve(&Request::get("/"), &mut response).unwrap();

        assert!(String::from_utf8_lossy(response.as_bytes()).starts_with("HTTP/1.1 400 Bad Request\n"));
        let problem: ProblemDetails = serde_json::from_str(&body_of(&response)).unwrap();
        assert_eq!(problem.status, 400);
    }
}
