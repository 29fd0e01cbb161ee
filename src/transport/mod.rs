//! Outbound short-message transport
//!
//! The alert destination hands its text to a `MessageTransport`; this crate
//! ships a client for the MessageBird REST messages API.

mod messagebird;

use async_trait::async_trait;

pub use messagebird::{MessageBirdTransport, DEFAULT_ENDPOINT};

/// One outbound text message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub originator: String,
    pub recipients: Vec<String>,
    pub body: String,
}

/// What the provider reported back for an accepted message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageReceipt {
    pub id: String,
    pub recipient_count: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Request never got a response
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("provider rejected message with status {status}: {description}")]
    Rejected { status: u16, description: String },

    /// Provider answered 2xx with a body we could not read
    #[error("unreadable provider response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
pub trait MessageTransport: Send + Sync {
    async fn send(&self, message: &OutboundMessage) -> Result<MessageReceipt, TransportError>;
}
