//! Submission admission pipeline.

use std::sync::Arc;

use crate::domain::{Post, ReviewState, SlugGenerator};
use crate::error::{DomainError, StoreError};
use crate::ports::{Moderator, PostStore, RateLimiter};

/// A submitted draft before admission.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

/// Orchestrates validation, throttling, moderation, slug assignment and
/// persistence for new posts.
///
/// Every collaborator is injected: tests substitute fakes, and separate
/// deployments can tune the limiter or swap the moderator without
/// touching the pipeline itself.
pub struct SubmissionPipeline {
    store: Arc<dyn PostStore>,
    moderator: Arc<dyn Moderator>,
    limiter: Arc<dyn RateLimiter>,
    slugs: SlugGenerator,
    auto_approve: bool,
}

impl SubmissionPipeline {
    pub fn new(
        store: Arc<dyn PostStore>,
        moderator: Arc<dyn Moderator>,
        limiter: Arc<dyn RateLimiter>,
        slugs: SlugGenerator,
        auto_approve: bool,
    ) -> Self {
        Self {
            store,
            moderator,
            limiter,
            slugs,
            auto_approve,
        }
    }

    /// Admit a draft submitted by the client identified by `client_key`.
    ///
    /// Gates run in order and fail fast; a successful run persists exactly
    /// one post. The operation is not idempotent - resubmitting the same
    /// draft creates a new post with a new slug and author id.
    pub async fn submit(&self, client_key: &str, draft: NewPost) -> Result<Post, DomainError> {
        if draft.title.trim().is_empty() {
            return Err(DomainError::Validation("title is required".into()));
        }
        if draft.content.trim().is_empty() {
            return Err(DomainError::Validation("content is required".into()));
        }

        let verdict = self
            .limiter
            .check(client_key)
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if !verdict.allowed {
            return Err(DomainError::RateLimited {
                retry_after: verdict.reset_after,
            });
        }

        if !self.moderator.is_admissible(&draft.title) {
            return Err(DomainError::ModerationDenied { field: "title" });
        }
        if !self.moderator.is_admissible(&draft.content) {
            return Err(DomainError::ModerationDenied { field: "content" });
        }

        let review = if self.auto_approve {
            ReviewState::Approved
        } else {
            ReviewState::PendingReview
        };
        let tags = normalize_tags(draft.tags);

        // One retry on the pathological suffix collision, then give up.
        let mut slug = self.slugs.generate(&draft.title);
        for attempt in 0..2 {
            let post = Post::new(
                draft.title.clone(),
                draft.content.clone(),
                tags.clone(),
                slug.clone(),
                review,
            );
            match self.store.insert(post).await {
                Ok(post) => return Ok(post),
                Err(StoreError::DuplicateSlug(_)) if attempt == 0 => {
                    slug = self.slugs.generate(&draft.title);
                }
                Err(err) => return Err(err.into()),
            }
        }
        Err(DomainError::SlugConflict(slug))
    }
}

/// Trim tags, drop empties, dedup keeping first-seen order.
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() {
            continue;
        }
        if !out.iter().any(|t| t.as_str() == tag) {
            out.push(tag.to_string());
        }
    }
    out
}
