//! Status simulation handler
//!
//! `/simulate/<code>` answers with `<code>` as the response status and logs
//! the outcome: error level for 5xx, info for everything else.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response, StatusCode};

use crate::http::{build_text_response, reason_phrase};
use crate::logger::Dispatcher;

pub const SIMULATE_PREFIX: &str = "/simulate/";

pub const HELP_TEXT: &str = "Hello. \
Please enter a valid status code in the path to simulate a HTTP server status. \
E.g. www.example.com/simulate/404";

/// Parse a path segment into the status code it names.
///
/// The segment must be exactly three ASCII digits naming a final status
/// (200..=999). 1xx statuses are interim and cannot end a response, so they
/// are rejected along with 000..=099.
pub fn parse_code(segment: &str) -> Option<StatusCode> {
    if segment.len() != 3 || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment
        .parse::<u16>()
        .ok()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .filter(|status| !status.is_informational())
}

/// Handle a request whose path starts with [`SIMULATE_PREFIX`]
pub async fn simulate_status(
    method: &Method,
    path: &str,
    dispatcher: &Dispatcher,
) -> Response<Full<Bytes>> {
    let segment = path
        .strip_prefix(SIMULATE_PREFIX)
        .unwrap_or_default()
        .split('/')
        .next()
        .unwrap_or_default();

    let Some(status) = parse_code(segment) else {
        let output = format!("Unknown status code used in path: {segment}");
        dispatcher.warning(output.as_str()).await;
        return build_text_response(StatusCode::OK, format!("{output}\n{HELP_TEXT}\n"));
    };

    let code = status.as_u16();
    let reason = reason_phrase(status);

    let output = if status.is_server_error() {
        let output = format!("Server error. [{method} {path}] {code} {reason}");
        dispatcher.error(output.as_str()).await;
        output
    } else {
        let output = format!("Everything's ok on our end.[{method} {path}] {code} {reason}");
        dispatcher.info(output.as_str()).await;
        output
    };

    build_text_response(status, format!("{output}\n"))
}
