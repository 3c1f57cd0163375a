//! The pure transition function of the intake flow.
//!
//! `advance` computes the next session state and the ordered replies for one
//! inbound message. It performs no I/O, so the whole transition table is
//! unit-testable without a store or a transport.

use crate::sessions::{ContactCard, ConversationState, Topic, UserSession};

use super::intent::Intent;

/// One outbound reply, as a template key plus whatever captured data the
/// template interpolates. Rendering happens later, against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Menu,
    BiddingInfo,
    ProjectInfo,
    HoursNotice { open: bool },
    AskName { affirmed: bool },
    AskEmail { topic: Topic },
    AskInquiry { topic: Topic },
    Closing { topic: Topic, open: bool, name: String, inquiry: String },
    DeclineAck,
    Fallback,
}

/// The outcome of one transition: the session fields to commit and the
/// replies to send, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub state: ConversationState,
    pub topic: Option<Topic>,
    pub contact: ContactCard,
    pub replies: Vec<Reply>,
}

/// Advance one conversation by one message.
///
/// Capture states accept any text verbatim (surrounding whitespace trimmed,
/// case preserved) and take precedence over keyword matching, so field data
/// that happens to contain a keyword is never misrouted. Keyword
/// interpretation only applies in `Idle`. `HandedOff` absorbs everything
/// silently. Empty captured text is accepted as-is.
pub fn advance(session: &UserSession, body: &str, within_hours: bool) -> Step {
    let mut step = Step {
        state: session.state,
        topic: session.topic,
        contact: session.contact.clone(),
        replies: Vec::new(),
    };
    let captured = body.trim();

    match session.state {
        ConversationState::HandedOff => {}

        ConversationState::AwaitName(topic) => {
            step.contact.name = Some(captured.to_string());
            step.state = ConversationState::AwaitEmail(topic);
            step.replies.push(Reply::AskEmail { topic });
        }

        ConversationState::AwaitEmail(topic) => {
            step.contact.email = Some(captured.to_string());
            step.state = ConversationState::AwaitInquiry(topic);
            step.replies.push(Reply::AskInquiry { topic });
        }

        ConversationState::AwaitInquiry(topic) => {
            step.contact.inquiry = Some(captured.to_string());
            step.state = ConversationState::HandedOff;
            step.replies.push(Reply::Closing {
                topic,
                open: within_hours,
                name: step.contact.name.clone().unwrap_or_default(),
                inquiry: captured.to_string(),
            });
        }

        ConversationState::Idle => match Intent::parse(body) {
            Intent::Greeting => step.replies.push(Reply::Menu),

            Intent::ChooseBidding => {
                step.topic = Some(Topic::Bidding);
                step.replies.push(Reply::BiddingInfo);
            }

            Intent::ChooseProject => {
                step.topic = Some(Topic::Project);
                step.replies.push(Reply::ProjectInfo);
            }

            Intent::ChooseRepresentative => {
                step.state = ConversationState::AwaitName(Topic::Representative);
                step.replies.push(Reply::HoursNotice { open: within_hours });
                step.replies.push(Reply::AskName { affirmed: false });
            }

            Intent::Affirm => match step.topic.take() {
                Some(topic) => {
                    step.state = ConversationState::AwaitName(topic);
                    step.replies.push(Reply::AskName { affirmed: true });
                }
                // A "si" with nothing pending falls through to the fallback.
                None => step.replies.push(Reply::Fallback),
            },

            Intent::Decline => {
                step.topic = None;
                step.replies.push(Reply::DeclineAck);
                step.replies.push(Reply::Menu);
            }

            Intent::Other => step.replies.push(Reply::Fallback),
        },
    }

    step
}
