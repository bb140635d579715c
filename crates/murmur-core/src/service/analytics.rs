//! Admin analytics - a full-collection scan computed at call time.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::domain::ReactionCounts;
use crate::error::DomainError;
use crate::ports::PostStore;

pub const TOP_TAG_COUNT: usize = 5;
pub const DAILY_WINDOW_DAYS: i64 = 30;

/// One tag with its usage count across all posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: u64,
}

/// Posts created on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: String,
    pub count: u64,
}

/// Aggregate view of the whole collection for the admin dashboard,
/// computed as of call time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_posts: u64,
    pub flagged_posts: u64,
    pub posts_this_month: u64,
    pub top_tags: Vec<TagCount>,
    pub daily_posts: Vec<DailyCount>,
    pub reaction_stats: ReactionCounts,
}

pub struct AnalyticsAggregator {
    store: Arc<dyn PostStore>,
}

impl AnalyticsAggregator {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    pub async fn summary(&self) -> Result<Summary, DomainError> {
        self.summary_at(Utc::now()).await
    }

    /// Compute the summary as of `now`; split out so tests can pin time.
    pub async fn summary_at(&self, now: DateTime<Utc>) -> Result<Summary, DomainError> {
        let posts = self.store.list().await?;

        let month_start = Utc
            .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
            .single()
            .expect("first day of a month is a valid timestamp");
        let today = now.date_naive();
        let window_start = today - Duration::days(DAILY_WINDOW_DAYS - 1);

        let mut total = 0u64;
        let mut flagged = 0u64;
        let mut this_month = 0u64;
        let mut reaction_stats = ReactionCounts::default();
        // tag -> (first-seen rank, count); posts are scanned oldest-first
        // so count ties resolve by historical first appearance
        let mut tag_counts: HashMap<String, (usize, u64)> = HashMap::new();
        let mut daily: HashMap<NaiveDate, u64> = HashMap::new();

        for post in posts.iter().rev() {
            total += 1;
            if post.review.is_flagged() {
                flagged += 1;
            }
            if post.created_at >= month_start {
                this_month += 1;
            }
            reaction_stats.merge(&post.reactions);

            for tag in &post.tags {
                let rank = tag_counts.len();
                let entry = tag_counts.entry(tag.clone()).or_insert((rank, 0));
                entry.1 += 1;
            }

            let day = post.created_at.date_naive();
            if day >= window_start && day <= today {
                *daily.entry(day).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(String, (usize, u64))> = tag_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.1.cmp(&a.1.1).then(a.1.0.cmp(&b.1.0)));
        let top_tags = ranked
            .into_iter()
            .take(TOP_TAG_COUNT)
            .map(|(tag, (_, count))| TagCount { tag, count })
            .collect();

        // Zero-filled ascending series: days without posts are emitted
        // with a zero count so the series shape is stable.
        let daily_posts = (0..DAILY_WINDOW_DAYS)
            .map(|offset| {
                let day = window_start + Duration::days(offset);
                DailyCount {
                    date: day.format("%Y-%m-%d").to_string(),
                    count: daily.get(&day).copied().unwrap_or(0),
                }
            })
            .collect();

        Ok(Summary {
            total_posts: total,
            flagged_posts: flagged,
            posts_this_month: this_month,
            top_tags,
            daily_posts,
            reaction_stats,
        })
    }
}
