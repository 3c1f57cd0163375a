//! Session storage traits and types for per-sender conversation state.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which of the three intake categories a conversation is about.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Topic {
    Bidding,
    Project,
    Representative,
}

/// Position of a conversation in the intake flow.
///
/// Capture steps carry their topic, so a capture state without a topic is
/// unrepresentable. `HandedOff` is absorbing: once reached, the bot never
/// replies to that sender again.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ConversationState {
    Idle,
    AwaitName(Topic),
    AwaitEmail(Topic),
    AwaitInquiry(Topic),
    HandedOff,
}

/// Contact details collected incrementally during a capture sub-flow.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactCard {
    pub name: Option<String>,
    pub email: Option<String>,
    pub inquiry: Option<String>,
}

/// A tracked conversation session, one per distinct sender identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSession {
    pub sender_id: String,
    pub state: ConversationState,
    /// Pending yes/no topic, set right after an informational reply and
    /// consumed when the answer is resolved.
    pub topic: Option<Topic>,
    pub contact: ContactCard,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl UserSession {
    pub fn new(sender_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            sender_id: sender_id.to_string(),
            state: ConversationState::Idle,
            topic: None,
            contact: ContactCard::default(),
            created_at: now,
            last_activity: now,
        }
    }

    pub fn is_handed_off(&self) -> bool {
        self.state == ConversationState::HandedOff
    }
}

/// Storage for per-sender conversation sessions.
///
/// Sessions are created lazily on first message and live for the process
/// lifetime unless explicitly deleted or purged. Individual operations are
/// atomic; a read-modify-`commit` sequence relies on the transport's
/// per-sender FIFO delivery for serialization.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Get the session for a sender, creating a fresh `Idle` one if absent.
    async fn get_or_create(&self, sender_id: &str, now: DateTime<Utc>) -> Result<UserSession>;

    /// Get an existing session, if any.
    async fn get(&self, sender_id: &str) -> Result<Option<UserSession>>;

    /// Write back a mutated session. Fails if the session does not exist.
    async fn commit(&self, session: UserSession) -> Result<()>;

    /// Delete a session.
    async fn delete(&self, sender_id: &str) -> Result<()>;

    /// All sessions, most recently active first.
    async fn list(&self) -> Result<Vec<UserSession>>;

    /// Number of live sessions.
    async fn count(&self) -> Result<usize>;

    /// Drop sessions whose last activity is older than `cutoff`. Returns how
    /// many were removed. Never scheduled automatically.
    async fn purge_idle(&self, cutoff: DateTime<Utc>) -> Result<usize>;

    /// The name of this session store implementation.
    fn name(&self) -> &str;
}
