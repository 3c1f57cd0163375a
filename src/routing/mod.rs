//! Conversation routing — the per-sender intake state machine.

pub mod default;
pub mod intent;
pub mod machine;
pub mod traits;

use std::sync::Arc;

pub use default::IntakeRouter;
pub use intent::Intent;
pub use machine::{advance, Reply, Step};
pub use traits::ConversationRouter;

use crate::hours::{BusinessHours, Clock};
use crate::sessions::SessionStore;
use crate::templates::MessageCatalog;

/// Create the default intake router over the given collaborators.
pub fn create_router(
    store: Arc<dyn SessionStore>,
    catalog: MessageCatalog,
    hours: BusinessHours,
    clock: Arc<dyn Clock>,
) -> Box<dyn ConversationRouter> {
    Box::new(IntakeRouter::new(store, catalog, hours, clock))
}
