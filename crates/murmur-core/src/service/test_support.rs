//! Test fakes for the ports. Production adapters live in the infra crate;
//! these exist so service tests can run without any of them.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    PollChoice, PollCounts, Post, ReactionCounts, ReactionKind, ReviewState, SlugGenerator,
};
use crate::error::StoreError;
use crate::ports::{Moderator, PostStore, RateLimitError, RateLimitResult, RateLimiter};

/// Straightforward mutex-guarded store; atomicity under contention is the
/// infra adapter's concern, not this fake's.
#[derive(Default)]
pub struct FakeStore {
    posts: Mutex<Vec<Post>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, post: Post) -> Post {
        self.insert(post).await.expect("seeding may not collide")
    }
}

#[async_trait]
impl PostStore for FakeStore {
    async fn insert(&self, post: Post) -> Result<Post, StoreError> {
        let mut posts = self.posts.lock().unwrap();
        if posts.iter().any(|p| p.slug == post.slug) {
            return Err(StoreError::DuplicateSlug(post.slug));
        }
        posts.push(post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, StoreError> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.slug == slug)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Post>, StoreError> {
        let mut posts: Vec<Post> = self.posts.lock().unwrap().clone();
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
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound)?;
        match kind {
            ReactionKind::Related => post.reactions.related += 1,
            ReactionKind::Thoughtful => post.reactions.thoughtful += 1,
            ReactionKind::Touched => post.reactions.touched += 1,
            ReactionKind::Inspired => post.reactions.inspired += 1,
        }
        Ok(post.reactions)
    }

    async fn increment_poll(
        &self,
        id: Uuid,
        choice: PollChoice,
    ) -> Result<PollCounts, StoreError> {
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound)?;
        match choice {
            PollChoice::Yes => post.poll.yes += 1,
            PollChoice::No => post.poll.no += 1,
        }
        Ok(post.poll)
    }

    async fn set_review(&self, id: Uuid, review: ReviewState) -> Result<Post, StoreError> {
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound)?;
        post.review = review;
        Ok(post.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

/// Moderator fake with a fixed term list.
pub struct FakeModerator {
    denied: Vec<String>,
}

impl FakeModerator {
    pub fn denying(terms: &[&str]) -> Self {
        Self {
            denied: terms.iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    pub fn permissive() -> Self {
        Self { denied: Vec::new() }
    }
}

impl Moderator for FakeModerator {
    fn is_admissible(&self, text: &str) -> bool {
        let haystack = text.to_lowercase();
        !self.denied.iter().any(|term| haystack.contains(term))
    }
}

/// Limiter fake with a global budget (not per key - key routing is the
/// adapter's concern).
pub struct FakeLimiter {
    budget: Mutex<usize>,
}

impl FakeLimiter {
    pub fn with_budget(budget: usize) -> Self {
        Self {
            budget: Mutex::new(budget),
        }
    }

    pub fn unlimited() -> Self {
        Self::with_budget(usize::MAX)
    }
}

#[async_trait]
impl RateLimiter for FakeLimiter {
    async fn check(&self, _key: &str) -> Result<RateLimitResult, RateLimitError> {
        let mut budget = self.budget.lock().unwrap();
        if *budget == 0 {
            return Ok(RateLimitResult {
                allowed: false,
                remaining: 0,
                reset_after: Duration::from_secs(60),
            });
        }
        *budget -= 1;
        Ok(RateLimitResult {
            allowed: true,
            remaining: u32::try_from(*budget).unwrap_or(u32::MAX),
            reset_after: Duration::from_secs(60),
        })
    }
}

/// Build a post with a derived slug, ready for seeding.
pub fn sample_post(title: &str, tags: &[&str], review: ReviewState) -> Post {
    let slug = SlugGenerator::default().generate(title);
    Post::new(
        title.to_string(),
        "body".to_string(),
        tags.iter().map(|t| t.to_string()).collect(),
        slug,
        review,
    )
}
