//! Session management — tracks where each sender is in the intake flow.

pub mod in_memory;
pub mod traits;

pub use in_memory::InMemorySessionStore;
pub use traits::{ContactCard, ConversationState, SessionStore, Topic, UserSession};

/// Create a default in-memory session store.
pub fn create_session_store() -> Box<dyn SessionStore> {
    Box::new(InMemorySessionStore::new())
}
