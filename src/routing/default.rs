//! Default router implementation over a session store and message catalog.

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::sync::Arc;

use crate::channels::{InboundEvent, OutboundMessage};
use crate::hours::{BusinessHours, Clock};
use crate::sessions::{SessionStore, Topic};
use crate::templates::{render, MessageCatalog, RenderError};

use super::machine::{self, Reply};
use super::traits::ConversationRouter;

/// Routes each sender's messages through the intake flow.
pub struct IntakeRouter {
    store: Arc<dyn SessionStore>,
    catalog: MessageCatalog,
    hours: BusinessHours,
    clock: Arc<dyn Clock>,
}

impl IntakeRouter {
    pub fn new(
        store: Arc<dyn SessionStore>,
        catalog: MessageCatalog,
        hours: BusinessHours,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            catalog,
            hours,
            clock,
        }
    }

    fn render_reply(&self, reply: &Reply) -> Result<String, RenderError> {
        let catalog = &self.catalog;
        match reply {
            Reply::Menu => Ok(catalog.menu.clone()),
            Reply::BiddingInfo => Ok(catalog.bidding_info.clone()),
            Reply::ProjectInfo => Ok(catalog.project_info.clone()),
            Reply::HoursNotice { open } => {
                let template = if *open {
                    &catalog.hours_open_notice
                } else {
                    &catalog.hours_closed_notice
                };
                let open_hour = format!("{:02}", self.hours.open_hour);
                let close_hour = format!("{:02}", self.hours.close_hour);
                render(
                    template,
                    &[("open", open_hour.as_str()), ("close", close_hour.as_str())],
                )
            }
            Reply::AskName { affirmed } => Ok(if *affirmed {
                catalog.ask_name_affirmed.clone()
            } else {
                catalog.ask_name.clone()
            }),
            Reply::AskEmail { topic } => Ok(match topic {
                Topic::Bidding => catalog.ask_email_bidding.clone(),
                Topic::Project | Topic::Representative => catalog.ask_email.clone(),
            }),
            Reply::AskInquiry { topic } => Ok(match topic {
                Topic::Representative => catalog.ask_inquiry_representative.clone(),
                Topic::Bidding | Topic::Project => catalog.ask_inquiry.clone(),
            }),
            Reply::Closing {
                topic,
                open,
                name,
                inquiry,
            } => {
                let template = match topic {
                    Topic::Representative if *open => &catalog.closing_representative_open,
                    Topic::Representative => &catalog.closing_representative_closed,
                    Topic::Bidding | Topic::Project => &catalog.closing,
                };
                render(template, &[("name", name.as_str()), ("inquiry", inquiry.as_str())])
            }
            Reply::DeclineAck => Ok(catalog.decline_ack.clone()),
            Reply::Fallback => Ok(catalog.fallback.clone()),
        }
    }

    /// Render a reply, substituting the generic fallback text if the
    /// template cannot be resolved, so the user always gets a response.
    fn render_or_fallback(&self, reply: &Reply) -> String {
        self.render_reply(reply).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "template render failed, sending fallback");
            self.catalog.fallback.clone()
        })
    }
}

#[async_trait]
impl ConversationRouter for IntakeRouter {
    async fn on_message(&self, event: &InboundEvent) -> Result<Vec<OutboundMessage>> {
        if event.from_self {
            tracing::debug!(sender = %event.sender, "own outbound echo, ignored");
            return Ok(Vec::new());
        }

        let sender = event.sender.trim();
        if sender.is_empty() {
            bail!("inbound event has no sender id");
        }

        let now = self.clock.now();
        let mut session = self.store.get_or_create(sender, now).await?;

        tracing::info!(
            sender = %sender,
            state = ?session.state,
            body_len = event.body.len(),
            "inbound message"
        );

        if session.is_handed_off() {
            tracing::debug!(sender = %sender, "conversation handed off, staying silent");
            return Ok(Vec::new());
        }

        let within_hours = self.hours.is_open_at(now);
        let step = machine::advance(&session, &event.body, within_hours);

        session.state = step.state;
        session.topic = step.topic;
        session.contact = step.contact;
        session.last_activity = now;
        let handed_off = session.is_handed_off();

        // Commit before handing replies to the transport: a crash after this
        // point re-prompts from the advanced state instead of a stale one.
        self.store.commit(session).await?;

        if handed_off {
            tracing::info!(sender = %sender, "conversation handed off to a human");
        }

        Ok(step
            .replies
            .iter()
            .map(|reply| OutboundMessage {
                recipient: sender.to_string(),
                text: self.render_or_fallback(reply),
            })
            .collect())
    }

    fn name(&self) -> &str {
        "intake"
    }
}
