//! HTTP protocol layer module
//!
//! Response construction shared by the request handlers.

pub mod response;

pub use response::{build_text_response, reason_phrase};
