//! Router trait: turns inbound events into committed state plus replies.

use anyhow::Result;
use async_trait::async_trait;

use crate::channels::{InboundEvent, OutboundMessage};

/// Interprets each inbound event against the sender's session and produces
/// the replies to deliver.
///
/// Implementations commit the advanced session state *before* returning the
/// replies, so a crash between commit and delivery re-prompts from the new
/// state rather than replaying a stale one.
#[async_trait]
pub trait ConversationRouter: Send + Sync {
    /// Handle one inbound event. An empty result means stay silent.
    async fn on_message(&self, event: &InboundEvent) -> Result<Vec<OutboundMessage>>;

    /// The name of this router implementation.
    fn name(&self) -> &str;
}
