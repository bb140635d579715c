//! Application state - services wired over the configured adapters.

use std::sync::Arc;

use murmur_core::domain::SlugGenerator;
use murmur_core::ports::{AdminCredential, Moderator, PostStore, RateLimiter};
use murmur_core::service::{
    AnalyticsAggregator, EngagementCounters, ModerationGateway, PublicFeed, RecommendationEngine,
    SubmissionPipeline,
};
use murmur_infra::{DenyListModerator, InMemoryPostStore, InMemoryRateLimiter};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub submissions: Arc<SubmissionPipeline>,
    pub feed: Arc<PublicFeed>,
    pub engagement: Arc<EngagementCounters>,
    pub recommendations: Arc<RecommendationEngine>,
    pub analytics: Arc<AnalyticsAggregator>,
    pub gateway: Arc<ModerationGateway>,
    pub engagement_limiter: Arc<dyn RateLimiter>,
    pub api_limiter: Arc<dyn RateLimiter>,
    pub credential: AdminCredential,
}

impl AppState {
    /// Wire the adapters into the domain services.
    ///
    /// The post collection lives in memory; swapping in an external
    /// document store only means replacing the `PostStore` value here.
    pub fn new(config: &AppConfig) -> Self {
        let store: Arc<dyn PostStore> = Arc::new(InMemoryPostStore::new());
        let moderator: Arc<dyn Moderator> =
            Arc::new(DenyListModerator::new(config.moderation.clone()));
        let submission_limiter: Arc<dyn RateLimiter> =
            Arc::new(InMemoryRateLimiter::new(config.submission_limit.clone()));
        let engagement_limiter: Arc<dyn RateLimiter> =
            Arc::new(InMemoryRateLimiter::new(config.engagement_limit.clone()));
        let api_limiter: Arc<dyn RateLimiter> =
            Arc::new(InMemoryRateLimiter::new(config.api_limit.clone()));

        let submissions = Arc::new(SubmissionPipeline::new(
            store.clone(),
            moderator,
            submission_limiter,
            SlugGenerator::default(),
            config.auto_approve,
        ));

        tracing::info!(auto_approve = config.auto_approve, "Application state initialized");

        Self {
            submissions,
            feed: Arc::new(PublicFeed::new(store.clone())),
            engagement: Arc::new(EngagementCounters::new(store.clone())),
            recommendations: Arc::new(RecommendationEngine::new(store.clone())),
            analytics: Arc::new(AnalyticsAggregator::new(store.clone())),
            gateway: Arc::new(ModerationGateway::new(store)),
            engagement_limiter,
            api_limiter,
            credential: AdminCredential::new(config.admin_token.clone()),
        }
    }
}
