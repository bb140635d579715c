//! Ports - trait definitions for external dependencies.
//! These are the seams that infrastructure must implement.

mod auth;
mod moderation;
mod rate_limit;
mod store;

pub use auth::{AdminCredential, AuthError};
pub use moderation::Moderator;
pub use rate_limit::{RateLimitError, RateLimitResult, RateLimiter};
pub use store::PostStore;
