use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{PollChoice, PollCounts, Post, ReactionCounts, ReactionKind, ReviewState};
use crate::error::StoreError;

/// Post storage port.
///
/// The backing store must provide a uniqueness constraint on `slug`,
/// single-field atomic counter increments, and full-collection reads.
/// The increment operations are the only mutation path for counters, so
/// concurrent engagement on the same post never degrades into an
/// application-level read-modify-write.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Insert a new post. Fails with [`StoreError::DuplicateSlug`] when
    /// the slug is already taken.
    async fn insert(&self, post: Post) -> Result<Post, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, StoreError>;

    /// All posts regardless of review state, newest first with a stable
    /// id tie-break for equal timestamps.
    async fn list(&self) -> Result<Vec<Post>, StoreError>;

    /// Atomically add one to a reaction counter, returning the updated
    /// tallies.
    async fn increment_reaction(
        &self,
        id: Uuid,
        kind: ReactionKind,
    ) -> Result<ReactionCounts, StoreError>;

    /// Atomically add one to a poll counter, returning the updated
    /// tallies.
    async fn increment_poll(&self, id: Uuid, choice: PollChoice)
    -> Result<PollCounts, StoreError>;

    /// Replace the review state, returning the updated post.
    async fn set_review(&self, id: Uuid, review: ReviewState) -> Result<Post, StoreError>;

    /// Remove a post permanently. There is no recovery path.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}
