//! In-memory session store implementation.

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;

use super::traits::{SessionStore, UserSession};

/// An in-memory session store backed by a mutex-protected hash map.
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, UserSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, sender_id: &str, now: DateTime<Utc>) -> Result<UserSession> {
        let mut sessions = self.sessions.lock();
        let session = sessions
            .entry(sender_id.to_string())
            .or_insert_with(|| UserSession::new(sender_id, now));
        Ok(session.clone())
    }

    async fn get(&self, sender_id: &str) -> Result<Option<UserSession>> {
        let sessions = self.sessions.lock();
        Ok(sessions.get(sender_id).cloned())
    }

    async fn commit(&self, session: UserSession) -> Result<()> {
        let mut sessions = self.sessions.lock();
        match sessions.get_mut(&session.sender_id) {
            Some(slot) => {
                *slot = session;
                Ok(())
            }
            None => bail!("session not found: {}", session.sender_id),
        }
    }

    async fn delete(&self, sender_id: &str) -> Result<()> {
        let mut sessions = self.sessions.lock();
        sessions.remove(sender_id);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<UserSession>> {
        let sessions = self.sessions.lock();
        let mut results: Vec<UserSession> = sessions.values().cloned().collect();
        results.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));
        Ok(results)
    }

    async fn count(&self) -> Result<usize> {
        let sessions = self.sessions.lock();
        Ok(sessions.len())
    }

    async fn purge_idle(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        let mut sessions = self.sessions.lock();
        let before = sessions.len();
        sessions.retain(|_, s| s.last_activity >= cutoff);
        Ok(before - sessions.len())
    }

    fn name(&self) -> &str {
        "in_memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::traits::{ConversationState, Topic};
    use chrono::Duration;

    #[tokio::test]
    async fn get_or_create_starts_idle() {
        let store = InMemorySessionStore::new();
        let session = store.get_or_create("551100001111", Utc::now()).await.unwrap();

        assert_eq!(session.sender_id, "551100001111");
        assert_eq!(session.state, ConversationState::Idle);
        assert!(session.topic.is_none());
        assert_eq!(session.contact, Default::default());
    }

    #[tokio::test]
    async fn get_or_create_is_idempotent() {
        let store = InMemorySessionStore::new();
        let now = Utc::now();

        let mut session = store.get_or_create("551100001111", now).await.unwrap();
        session.state = ConversationState::AwaitName(Topic::Bidding);
        store.commit(session).await.unwrap();

        // A second lookup must return the existing session, not a fresh one.
        let again = store.get_or_create("551100001111", Utc::now()).await.unwrap();
        assert_eq!(again.state, ConversationState::AwaitName(Topic::Bidding));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn get_returns_none_for_missing_session() {
        let store = InMemorySessionStore::new();
        assert!(store.get("551100001111").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn commit_fails_for_missing_session() {
        let store = InMemorySessionStore::new();
        let session = UserSession::new("ghost", Utc::now());

        let result = store.commit(session).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn sessions_are_isolated_per_sender() {
        let store = InMemorySessionStore::new();
        let now = Utc::now();

        let mut a = store.get_or_create("sender-a", now).await.unwrap();
        a.state = ConversationState::AwaitEmail(Topic::Project);
        a.contact.name = Some("Ana".to_string());
        store.commit(a).await.unwrap();

        let b = store.get_or_create("sender-b", now).await.unwrap();
        assert_eq!(b.state, ConversationState::Idle);
        assert!(b.contact.name.is_none());

        let a = store.get("sender-a").await.unwrap().unwrap();
        assert_eq!(a.contact.name.as_deref(), Some("Ana"));
    }

    #[tokio::test]
    async fn delete_removes_session() {
        let store = InMemorySessionStore::new();
        store.get_or_create("551100001111", Utc::now()).await.unwrap();

        store.delete("551100001111").await.unwrap();
        assert!(store.get("551100001111").await.unwrap().is_none());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn list_orders_by_recent_activity() {
        let store = InMemorySessionStore::new();
        let base = Utc::now();
        store.get_or_create("older", base - Duration::minutes(10)).await.unwrap();
        store.get_or_create("newer", base).await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].sender_id, "newer");
        assert_eq!(listed[1].sender_id, "older");
    }

    #[tokio::test]
    async fn purge_idle_drops_stale_sessions_only() {
        let store = InMemorySessionStore::new();
        let base = Utc::now();
        store.get_or_create("stale", base - Duration::hours(2)).await.unwrap();
        store.get_or_create("fresh", base).await.unwrap();

        let removed = store.purge_idle(base - Duration::hours(1)).await.unwrap();
        assert_eq!(removed, 1);
        assert!(store.get("stale").await.unwrap().is_none());
        assert!(store.get("fresh").await.unwrap().is_some());
    }
}
