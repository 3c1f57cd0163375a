//! Transport boundary types and the outbound delivery trait.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One message received from the transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundEvent {
    /// Opaque sender identity, unique per conversation partner.
    pub sender: String,
    pub body: String,
    /// True when the message was authored by the bot's own account. Some
    /// transports echo outbound messages back on the same stream.
    pub from_self: bool,
    pub timestamp: DateTime<Utc>,
}

impl InboundEvent {
    pub fn new(sender: &str, body: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            sender: sender.to_string(),
            body: body.to_string(),
            from_self: false,
            timestamp,
        }
    }
}

/// One message to deliver through the transport.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutboundMessage {
    pub recipient: String,
    pub text: String,
}

/// Outbound side of a channel. Delivery failures are logged and dropped by
/// callers; retry policy belongs to the transport itself.
#[async_trait]
pub trait ChannelSender: Send + Sync {
    /// Deliver a single message to its recipient.
    async fn deliver(&self, message: &OutboundMessage) -> Result<()>;

    /// The name of this channel implementation.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inbound_event_serialization() {
        let event = InboundEvent::new("551100001111", "hola", Utc::now());
        let json = serde_json::to_string(&event).unwrap();
        let back: InboundEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(back.sender, "551100001111");
        assert_eq!(back.body, "hola");
        assert!(!back.from_self);
    }

    #[test]
    fn outbound_message_serialization() {
        let msg = OutboundMessage {
            recipient: "551100001111".to_string(),
            text: "¡Hola!".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        let back: OutboundMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }
}
