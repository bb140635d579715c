//! Tag-overlap recommendations.

use std::sync::Arc;

use crate::domain::{Post, visibility};
use crate::error::DomainError;
use crate::ports::PostStore;

pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 4;

/// Related-post lookup: visible posts sharing at least one tag with the
/// source, newest first. A fresh call recomputes; nothing is cached.
pub struct RecommendationEngine {
    store: Arc<dyn PostStore>,
}

impl RecommendationEngine {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    /// Posts related to the visible post identified by `slug`. A source
    /// without tags yields an empty list - there is no fallback heuristic.
    pub async fn related(&self, slug: &str, limit: usize) -> Result<Vec<Post>, DomainError> {
        let source = match self.store.find_by_slug(slug).await? {
            Some(post) if visibility::is_public(&post) => post,
            _ => return Err(DomainError::NotFound),
        };
        if source.tags.is_empty() {
            return Ok(Vec::new());
        }

        // list() is newest-first with a stable id tie-break already
        let mut related: Vec<Post> = self
            .store
            .list()
            .await?
            .into_iter()
            .filter(|p| p.id != source.id)
            .filter(visibility::is_public)
            .filter(|p| p.shares_tag_with(&source))
            .collect();
        related.truncate(limit);
        Ok(related)
    }
}
