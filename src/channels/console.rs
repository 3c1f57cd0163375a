//! Console channel: reads stdin lines, prints replies to stdout.
//!
//! The local stand-in for a real messaging transport. Each line typed is one
//! inbound message from a fixed sender id; replies are printed styled.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use console::style;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::traits::{ChannelSender, InboundEvent, OutboundMessage};
use crate::routing::ConversationRouter;

/// Prints outbound messages to the terminal.
pub struct ConsoleChannel;

impl ConsoleChannel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChannelSender for ConsoleChannel {
    async fn deliver(&self, message: &OutboundMessage) -> Result<()> {
        println!("{} {}", style("bot>").cyan().bold(), message.text);
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

/// Run an interactive conversation until EOF or `/quit`.
///
/// Handling failures and delivery failures are logged and the loop keeps
/// going; a broken message must never take the whole channel down.
pub async fn run_console_loop(
    router: &dyn ConversationRouter,
    channel: &dyn ChannelSender,
    sender_id: &str,
) -> Result<()> {
    println!(
        "{}",
        style("Interactive intake conversation. Type /quit to exit.").dim()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "/quit" {
            break;
        }

        let event = InboundEvent::new(sender_id, &line, Utc::now());
        match router.on_message(&event).await {
            Ok(replies) => {
                for reply in &replies {
                    if let Err(err) = channel.deliver(reply).await {
                        tracing::warn!(
                            error = %err,
                            recipient = %reply.recipient,
                            "send failed, dropping reply"
                        );
                    }
                }
            }
            Err(err) => tracing::error!(error = %err, "message handling failed"),
        }
    }

    Ok(())
}
