//! HTTP response builder module

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

/// Content type of every body this server writes
pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Build a plain-text response with the given status
pub fn build_text_response(status: StatusCode, body: String) -> Response<Full<Bytes>> {
    let content_length = body.len();
    Response::builder()
        .status(status)
        .header("Content-Type", TEXT_PLAIN)
        .header("Content-Length", content_length)
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            eprintln!("[ERROR] Failed to build {status} response: {e}");
            Response::new(Full::new(Bytes::new()))
        })
}

/// Standard reason phrase, empty when the code has none
pub fn reason_phrase(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("")
}
