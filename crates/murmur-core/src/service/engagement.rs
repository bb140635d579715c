//! Engagement counters - reactions and the binary poll.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{PollChoice, PollCounts, ReactionCounts, ReactionKind};
use crate::error::DomainError;
use crate::ports::PostStore;

/// Applies engagement increments through the store's atomic counter
/// operations.
///
/// Repeated reactions from the same caller are accepted; any client-side
/// "already reacted" marker is advisory only and not enforced here.
pub struct EngagementCounters {
    store: Arc<dyn PostStore>,
}

impl EngagementCounters {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    pub async fn react(
        &self,
        post_id: Uuid,
        kind: ReactionKind,
    ) -> Result<ReactionCounts, DomainError> {
        Ok(self.store.increment_reaction(post_id, kind).await?)
    }

    pub async fn vote(
        &self,
        post_id: Uuid,
        choice: PollChoice,
    ) -> Result<PollCounts, DomainError> {
        Ok(self.store.increment_poll(post_id, choice).await?)
    }
}
