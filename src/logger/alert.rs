//! SMS alert destination

use std::sync::Arc;

use async_trait::async_trait;

use super::error::Result;
use super::writer::Destination;
use crate::transport::{MessageTransport, OutboundMessage};

/// Single-message budget of the SMS transport
pub const SMS_LIMIT: usize = 160;

/// Forwards rendered log text as a text message to a fixed recipient list
pub struct AlertDestination {
    transport: Arc<dyn MessageTransport>,
    originator: String,
    recipients: Vec<String>,
}

impl AlertDestination {
    pub fn new(
        transport: Arc<dyn MessageTransport>,
        originator: impl Into<String>,
        recipients: Vec<String>,
    ) -> Self {
        Self {
            transport,
            originator: originator.into(),
            recipients,
        }
    }
}

/// Cut `text` down for a single SMS.
///
/// Text over [`SMS_LIMIT`] characters keeps only its first `SMS_LIMIT - 1`
/// characters: 160 passes untouched, 161 becomes 159.
pub fn truncate_for_sms(text: &str) -> &str {
    if text.chars().count() <= SMS_LIMIT {
        return text;
    }
    let end = text
        .char_indices()
        .nth(SMS_LIMIT - 1)
        .map_or(text.len(), |(idx, _)| idx);
    &text[..end]
}

#[async_trait]
impl Destination for AlertDestination {
    fn name(&self) -> &str {
        "alert"
    }

    async fn write(&self, text: &str) -> Result<()> {
        let message = OutboundMessage {
            originator: self.originator.clone(),
            recipients: self.recipients.clone(),
            body: truncate_for_sms(text).to_string(),
        };
        let receipt = self.transport.send(&message).await?;
        println!(
            "Message sent: {} ({} recipients)",
            receipt.id, receipt.recipient_count
        );
        Ok(())
    }
}
