// Application state module
// Shared, read-only state handed to every connection

use std::sync::Arc;

use crate::logger::Dispatcher;

/// Application state
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub const fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}
