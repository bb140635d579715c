//! In-memory post store - the default when no external store is configured.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use murmur_core::domain::{
    PollChoice, PollCounts, Post, ReactionCounts, ReactionKind, ReviewState,
};
use murmur_core::error::StoreError;
use murmur_core::ports::PostStore;

/// Stored representation of a post.
///
/// Counters live in atomics: a concurrent engagement increment is a
/// single `fetch_add` under the shared read lock, never a
/// read-modify-write of the whole record, so simultaneous reactions on
/// one post all land.
struct StoredPost {
    id: Uuid,
    title: String,
    content: String,
    tags: Vec<String>,
    slug: String,
    author_id: Uuid,
    review: ReviewState,
    related: AtomicU64,
    thoughtful: AtomicU64,
    touched: AtomicU64,
    inspired: AtomicU64,
    yes: AtomicU64,
    no: AtomicU64,
    created_at: DateTime<Utc>,
}

impl StoredPost {
    fn from_post(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            tags: post.tags,
            slug: post.slug,
            author_id: post.author_id,
            review: post.review,
            related: AtomicU64::new(post.reactions.related),
            thoughtful: AtomicU64::new(post.reactions.thoughtful),
            touched: AtomicU64::new(post.reactions.touched),
            inspired: AtomicU64::new(post.reactions.inspired),
            yes: AtomicU64::new(post.poll.yes),
            no: AtomicU64::new(post.poll.no),
            created_at: post.created_at,
        }
    }

    fn reactions(&self) -> ReactionCounts {
        ReactionCounts {
            related: self.related.load(Ordering::Relaxed),
            thoughtful: self.thoughtful.load(Ordering::Relaxed),
            touched: self.touched.load(Ordering::Relaxed),
            inspired: self.inspired.load(Ordering::Relaxed),
        }
    }

    fn poll(&self) -> PollCounts {
        PollCounts {
            yes: self.yes.load(Ordering::Relaxed),
            no: self.no.load(Ordering::Relaxed),
        }
    }

    fn snapshot(&self) -> Post {
        Post {
            id: self.id,
            title: self.title.clone(),
            content: self.content.clone(),
            tags: self.tags.clone(),
            slug: self.slug.clone(),
            author_id: self.author_id,
            review: self.review,
            reactions: self.reactions(),
            poll: self.poll(),
            created_at: self.created_at,
        }
    }
}

#[derive(Default)]
struct Collection {
    posts: HashMap<Uuid, StoredPost>,
    // slug uniqueness index, maintained alongside the posts map
    slugs: HashMap<String, Uuid>,
}

/// In-memory post collection with a slug uniqueness index.
///
/// Structural changes (insert, review updates, delete) take the write
/// lock; lookups and counter increments share the read lock. Data is
/// lost on process restart.
pub struct InMemoryPostStore {
    inner: RwLock<Collection>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Collection::default()),
        }
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn insert(&self, post: Post) -> Result<Post, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.slugs.contains_key(&post.slug) {
            tracing::debug!(slug = %post.slug, "slug collision on insert");
            return Err(StoreError::DuplicateSlug(post.slug));
        }
        inner.slugs.insert(post.slug.clone(), post.id);
        let stored = StoredPost::from_post(post);
        let snapshot = stored.snapshot();
        inner.posts.insert(stored.id, stored);
        Ok(snapshot)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.posts.get(&id).map(StoredPost::snapshot))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .slugs
            .get(slug)
            .and_then(|id| inner.posts.get(id))
            .map(StoredPost::snapshot))
    }

    async fn list(&self) -> Result<Vec<Post>, StoreError> {
        let inner = self.inner.read().await;
        let mut posts: Vec<Post> = inner.posts.values().map(StoredPost::snapshot).collect();
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(posts)
    }

    async fn increment_reaction(
        &self,
        id: Uuid,
        kind: ReactionKind,
    ) -> Result<ReactionCounts, StoreError> {
        let inner = self.inner.read().await;
        let stored = inner.posts.get(&id).ok_or(StoreError::NotFound)?;
        let cell = match kind {
            ReactionKind::Related => &stored.related,
            ReactionKind::Thoughtful => &stored.thoughtful,
            ReactionKind::Touched => &stored.touched,
            ReactionKind::Inspired => &stored.inspired,
        };
        cell.fetch_add(1, Ordering::Relaxed);
        Ok(stored.reactions())
    }

    async fn increment_poll(
        &self,
        id: Uuid,
        choice: PollChoice,
    ) -> Result<PollCounts, StoreError> {
        let inner = self.inner.read().await;
        let stored = inner.posts.get(&id).ok_or(StoreError::NotFound)?;
        let cell = match choice {
            PollChoice::Yes => &stored.yes,
            PollChoice::No => &stored.no,
        };
        cell.fetch_add(1, Ordering::Relaxed);
        Ok(stored.poll())
    }

    async fn set_review(&self, id: Uuid, review: ReviewState) -> Result<Post, StoreError> {
        let mut inner = self.inner.write().await;
        let stored = inner.posts.get_mut(&id).ok_or(StoreError::NotFound)?;
        stored.review = review;
        Ok(stored.snapshot())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let removed = inner.posts.remove(&id).ok_or(StoreError::NotFound)?;
        inner.slugs.remove(&removed.slug);
        Ok(())
    }
}
