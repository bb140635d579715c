//! Public read surface. Visibility is evaluated on every query.

use std::sync::Arc;

use crate::domain::{Post, visibility};
use crate::error::DomainError;
use crate::ports::PostStore;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 50;

/// Visibility-filtered reads for the public feed.
pub struct PublicFeed {
    store: Arc<dyn PostStore>,
}

impl PublicFeed {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    /// Visible posts, newest first. `page` is 1-based; `limit` is clamped
    /// to [`MAX_PAGE_SIZE`].
    pub async fn page(&self, page: usize, limit: usize) -> Result<Vec<Post>, DomainError> {
        let page = page.max(1);
        let limit = limit.clamp(1, MAX_PAGE_SIZE);
        let posts = self.store.list().await?;
        Ok(posts
            .into_iter()
            .filter(visibility::is_public)
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .collect())
    }

    /// A single visible post. A hidden post and a missing one are
    /// indistinguishable to the caller.
    pub async fn by_slug(&self, slug: &str) -> Result<Post, DomainError> {
        match self.store.find_by_slug(slug).await? {
            Some(post) if visibility::is_public(&post) => Ok(post),
            _ => Err(DomainError::NotFound),
        }
    }
}
