//! Moderation gateway - the admin-only view of the collection.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Post, ReviewState};
use crate::error::DomainError;
use crate::ports::PostStore;

/// Admin operations over posts.
///
/// Authorization happens at the HTTP boundary; every method here assumes
/// a verified caller and bypasses the public visibility predicate on
/// purpose.
pub struct ModerationGateway {
    store: Arc<dyn PostStore>,
}

impl ModerationGateway {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    /// Every post, newest first, regardless of review state.
    pub async fn list_all(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.store.list().await?)
    }

    /// Flagging a post rejects it; unflagging a rejected post restores
    /// approval. The legacy `flagged` and `status` fields move together -
    /// they are one state here.
    pub async fn set_flag(&self, id: Uuid, flagged: bool) -> Result<Post, DomainError> {
        let current = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound)?;
        let next = match (flagged, current.review) {
            (true, _) => ReviewState::Rejected,
            (false, ReviewState::Rejected) => ReviewState::Approved,
            (false, unchanged) => unchanged,
        };
        Ok(self.store.set_review(id, next).await?)
    }

    /// Change the workflow status. Rejection implies the flag; approval
    /// clears it. A post that has left review cannot return to pending -
    /// setting `pending` on a pending post is an idempotent no-op, on any
    /// other post it is refused.
    pub async fn set_status(&self, id: Uuid, status: ReviewState) -> Result<Post, DomainError> {
        let current = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound)?;
        if status == ReviewState::PendingReview && current.review != ReviewState::PendingReview {
            return Err(DomainError::Validation(
                "a post cannot return to pending review".into(),
            ));
        }
        Ok(self.store.set_review(id, status).await?)
    }

    /// Irreversible removal - no tombstone, no recovery path.
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        Ok(self.store.delete(id).await?)
    }
}
