//! Domain services - orchestration over the ports.

mod analytics;
mod engagement;
mod feed;
mod gateway;
mod recommend;
mod submission;

pub use analytics::{AnalyticsAggregator, DailyCount, Summary, TagCount};
pub use engagement::EngagementCounters;
pub use feed::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PublicFeed};
pub use gateway::ModerationGateway;
pub use recommend::{DEFAULT_RECOMMENDATION_LIMIT, RecommendationEngine};
pub use submission::{NewPost, SubmissionPipeline};

#[cfg(test)]
pub(crate) mod test_support;
