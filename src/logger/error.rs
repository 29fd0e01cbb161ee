//! Destination error types

use crate::transport::TransportError;

pub type Result<T> = std::result::Result<T, DestinationError>;

#[derive(Debug, thiserror::Error)]
pub enum DestinationError {
    /// Local write or flush failed
    #[error("IO error while {operation}: {source}")]
    Io {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Outbound message could not be delivered
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// A writer panicked while holding the sink lock
    #[error("sink lock poisoned")]
    Poisoned,
}

impl DestinationError {
    pub const fn io(operation: &'static str, source: std::io::Error) -> Self {
        Self::Io { operation, source }
    }
}
