//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: `/simulate/…` goes to the status
//! simulator, every other path gets the help text.

use crate::config::AppState;
use crate::handler::simulate::{self, HELP_TEXT, SIMULATE_PREFIX};
use crate::http;
use crate::logger::Dispatcher;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, StatusCode};
use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use std::convert::Infallible;
use std::sync::Arc;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let path = decode_path(req.uri().path());
    Ok(route_request(req.method(), &path, &state.dispatcher).await)
}

/// Percent-decode the request path; invalid UTF-8 keeps the raw form
fn decode_path(raw: &str) -> Cow<'_, str> {
    percent_decode_str(raw)
        .decode_utf8()
        .unwrap_or(Cow::Borrowed(raw))
}

/// Route request based on path
pub async fn route_request(
    method: &Method,
    path: &str,
    dispatcher: &Dispatcher,
) -> Response<Full<Bytes>> {
    if path.starts_with(SIMULATE_PREFIX) {
        return simulate::simulate_status(method, path, dispatcher).await;
    }
    http::build_text_response(StatusCode::OK, format!("{HELP_TEXT}\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::tests::MemoryDestination;
    use crate::logger::LevelSet;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_root_returns_help_without_logging() {
        let sink = MemoryDestination::named("all");
        let dispatcher = Dispatcher::builder()
            .register(sink.clone(), LevelSet::ALL)
            .build();

        for path in ["/", "/favicon.ico", "/simulate", "/simulated/500"] {
            let resp = route_request(&Method::GET, path, &dispatcher).await;
            assert_eq!(resp.status(), 200, "path {path}");
            let body = resp.into_body().collect().await.unwrap().to_bytes();
            assert_eq!(&body[..], format!("{HELP_TEXT}\n").as_bytes());
        }

        assert!(sink.lines().is_empty());
    }

    #[tokio::test]
    async fn test_simulate_prefix_is_routed() {
        let sink = MemoryDestination::named("all");
        let dispatcher = Dispatcher::builder()
            .register(sink.clone(), LevelSet::ALL)
            .build();

        let resp = route_request(&Method::GET, "/simulate/302", &dispatcher).await;
        assert_eq!(resp.status(), 302);
        assert_eq!(sink.lines().len(), 1);
    }

    fn state_with(sink: &MemoryDestination) -> Arc<AppState> {
        let dispatcher = Dispatcher::builder()
            .register(sink.clone(), LevelSet::ALL)
            .build();
        Arc::new(AppState::new(Arc::new(dispatcher)))
    }

    #[test]
    fn test_decode_path() {
        assert_eq!(decode_path("/simulate/%35%30%33"), "/simulate/503");
        assert_eq!(decode_path("/simulate/a%20b"), "/simulate/a b");
        assert_eq!(decode_path("/simulate/404"), "/simulate/404");
        // Not UTF-8 once decoded
        assert_eq!(decode_path("/simulate/%ff"), "/simulate/%ff");
    }

    #[tokio::test]
    async fn test_encoded_server_error_code() {
        let sink = MemoryDestination::named("all");
        let req = Request::builder()
            .uri("/simulate/%35%30%33")
            .body(())
            .unwrap();

        let resp = handle_request(req, state_with(&sink)).await.unwrap();
        assert_eq!(resp.status(), 503);
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(
            &body[..],
            b"Server error. [GET /simulate/503] 503 Service Unavailable\n"
        );

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("level=error"));
    }

    #[tokio::test]
    async fn test_encoded_unknown_segment_is_decoded() {
        let sink = MemoryDestination::named("all");
        let req = Request::builder()
            .uri("/simulate/a%20b")
            .body(())
            .unwrap();

        let resp = handle_request(req, state_with(&sink)).await.unwrap();
        assert_eq!(resp.status(), 200);
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.starts_with("Unknown status code used in path: a b\n"));

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("level=warning"));
        assert!(lines[0].contains("Unknown status code used in path: a b"));
    }
}
