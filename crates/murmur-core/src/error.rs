//! Domain-level error types.

use std::time::Duration;

use thiserror::Error;

/// Domain errors - admission and lookup failures surfaced to callers.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Content denied by moderation: {field}")]
    ModerationDenied { field: &'static str },

    #[error("Rate limit exceeded, retry after {}s", retry_after.as_secs())]
    RateLimited { retry_after: Duration },

    #[error("Post not found")]
    NotFound,

    #[error("Slug already taken: {0}")]
    SlugConflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Storage-level errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Post not found")]
    NotFound,

    #[error("Slug already taken: {0}")]
    DuplicateSlug(String),

    #[error("Storage backend failure: {0}")]
    Backend(String),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => DomainError::NotFound,
            StoreError::DuplicateSlug(slug) => DomainError::SlugConflict(slug),
            StoreError::Backend(msg) => DomainError::Internal(msg),
        }
    }
}
