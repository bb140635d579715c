//! # Murmur Infrastructure
//!
//! Concrete implementations of the ports defined in `murmur-core`:
//! the in-memory post store, the deny-list moderator, and the keyed
//! in-memory rate limiter.

pub mod moderation;
pub mod rate_limit;
pub mod store;

pub use moderation::{DenyListModerator, ModerationConfig};
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
pub use store::InMemoryPostStore;
