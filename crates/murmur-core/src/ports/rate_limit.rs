//! Rate limiting port.

use async_trait::async_trait;
use std::time::Duration;

/// Rate limiter - keyed by client identity, one instance per action
/// class (submission, engagement, generic API traffic), each with its
/// own counter state.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Check whether the caller identified by `key` may proceed, updating
    /// the counter for that key.
    async fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError>;
}

/// Result of a rate limit check.
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    /// How long the caller should wait before retrying; handed back to
    /// clients so they can compute a backoff.
    pub reset_after: Duration,
}

/// Rate limit errors.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Backend error: {0}")]
    Backend(String),
}
