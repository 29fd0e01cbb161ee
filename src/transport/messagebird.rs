//! MessageBird REST client for sending SMS

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{MessageReceipt, MessageTransport, OutboundMessage, TransportError};

pub const DEFAULT_ENDPOINT: &str = "https://rest.messagebird.com/messages";

#[derive(Clone)]
pub struct MessageBirdTransport {
    client: reqwest::Client,
    endpoint: String,
    access_key: String,
}

#[derive(Serialize)]
struct CreateMessage<'a> {
    originator: &'a str,
    recipients: &'a [String],
    body: &'a str,
}

#[derive(Deserialize)]
struct CreatedMessage {
    id: String,
    #[serde(default)]
    recipients: RecipientSummary,
}

#[derive(Deserialize, Default)]
struct RecipientSummary {
    #[serde(rename = "totalCount", default)]
    total_count: usize,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    description: String,
}

impl MessageBirdTransport {
    pub fn new(endpoint: impl Into<String>, access_key: impl Into<String>) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("statusmon/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            access_key: access_key.into(),
        })
    }
}

#[async_trait]
impl MessageTransport for MessageBirdTransport {
    async fn send(&self, message: &OutboundMessage) -> Result<MessageReceipt, TransportError> {
        let payload = CreateMessage {
            originator: &message.originator,
            recipients: &message.recipients,
            body: &message.body,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("AccessKey {}", self.access_key))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let description = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.errors.into_iter().next())
                .map_or_else(
                    || status.canonical_reason().unwrap_or("unknown error").to_string(),
                    |e| e.description,
                );
            return Err(TransportError::Rejected {
                status: status.as_u16(),
                description,
            });
        }

        let created: CreatedMessage = serde_json::from_slice(&body)?;
        Ok(MessageReceipt {
            id: created.id,
            recipient_count: created.recipients.total_count,
        })
    }
}
