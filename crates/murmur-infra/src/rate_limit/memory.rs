//! Keyed in-memory rate limiter using the governor crate.

use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::{Clock, DefaultClock};
use governor::middleware::StateInformationMiddleware;
use governor::state::keyed::DashMapStateStore;
use governor::{Quota, RateLimiter as GovernorRateLimiter};

use murmur_core::ports::{RateLimitError, RateLimitResult, RateLimiter};

type KeyedLimiter =
    GovernorRateLimiter<String, DashMapStateStore<String>, DefaultClock, StateInformationMiddleware>;

/// Limiter configuration - one instance per action class, each with its
/// own window and per-key state.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per key per window.
    pub max_requests: u32,
    /// Window duration.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::from_secs(900),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }
}

/// Per-key GCRA limiter.
///
/// A full window's worth of burst is available per key, replenished over
/// the window. State lives only in this process and expires with the
/// window; limits are per-instance, not distributed.
pub struct InMemoryRateLimiter {
    limiter: KeyedLimiter,
    config: RateLimitConfig,
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        let max = config.max_requests.max(1);
        let burst = NonZeroU32::new(max).expect("non-zero burst");
        let quota = Quota::with_period(config.window / max)
            .expect("non-zero replenish period")
            .allow_burst(burst);
        let limiter =
            GovernorRateLimiter::keyed(quota).with_middleware::<StateInformationMiddleware>();
        Self { limiter, config }
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError> {
        match self.limiter.check_key(&key.to_string()) {
            Ok(snapshot) => Ok(RateLimitResult {
                allowed: true,
                remaining: snapshot.remaining_burst_capacity(),
                reset_after: self.config.window,
            }),
            Err(not_until) => Ok(RateLimitResult {
                allowed: false,
                remaining: 0,
                reset_after: not_until.wait_time_from(DefaultClock::default().now()),
            }),
        }
    }
}
