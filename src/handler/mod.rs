//! Request handler module
//!
//! Responsible for request routing dispatch and the status simulation logic.

pub mod router;
pub mod simulate;

// Re-export main entry point
pub use router::handle_request;
