//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use murmur_infra::{ModerationConfig, RateLimitConfig};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// The process-wide admin secret.
    pub admin_token: String,
    /// Whether new submissions go live immediately or wait for review.
    pub auto_approve: bool,
    pub moderation: ModerationConfig,
    pub submission_limit: RateLimitConfig,
    pub engagement_limit: RateLimitConfig,
    pub api_limit: RateLimitConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let admin_token = env::var("ADMIN_TOKEN").unwrap_or_else(|_| {
            let generated = uuid::Uuid::new_v4().simple().to_string();
            tracing::warn!("ADMIN_TOKEN not set; using ephemeral token {generated}");
            generated
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            admin_token,
            auto_approve: env::var("AUTO_APPROVE")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            moderation: ModerationConfig::from_env(),
            submission_limit: limit_from_env("SUBMISSION", 5, Duration::from_secs(3600)),
            engagement_limit: limit_from_env("ENGAGEMENT", 10, Duration::from_secs(3600)),
            api_limit: limit_from_env("API", 100, Duration::from_secs(900)),
        }
    }
}

/// Parse `<PREFIX>_LIMIT_MAX` and `<PREFIX>_LIMIT_WINDOW_SECS`, with
/// per-action-class defaults.
fn limit_from_env(prefix: &str, max_requests: u32, window: Duration) -> RateLimitConfig {
    let max = env::var(format!("{prefix}_LIMIT_MAX"))
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(max_requests);
    let window = env::var(format!("{prefix}_LIMIT_WINDOW_SECS"))
        .ok()
        .and_then(|s| s.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(window);
    RateLimitConfig::new(max, window)
}
