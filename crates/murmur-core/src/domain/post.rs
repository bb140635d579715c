use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Review state of a post - the single source of truth behind the legacy
/// `status` + `flagged` field pair.
///
/// The two legacy fields always move together (flagging rejects, rejecting
/// flags), so they are one tagged state here and only re-derived at the
/// wire boundary via [`ReviewState::status_label`] and
/// [`ReviewState::is_flagged`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
    PendingReview,
    Approved,
    Rejected,
}

impl ReviewState {
    /// Legacy wire label for this state.
    pub fn status_label(&self) -> &'static str {
        match self {
            ReviewState::PendingReview => "pending",
            ReviewState::Approved => "approved",
            ReviewState::Rejected => "rejected",
        }
    }

    /// Legacy `flagged` projection.
    pub fn is_flagged(&self) -> bool {
        matches!(self, ReviewState::Rejected)
    }
}

impl FromStr for ReviewState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReviewState::PendingReview),
            "approved" => Ok(ReviewState::Approved),
            "rejected" => Ok(ReviewState::Rejected),
            other => Err(DomainError::Validation(format!("unknown status: {other}"))),
        }
    }
}

/// The four fixed reaction tallies a post accumulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Related,
    Thoughtful,
    Touched,
    Inspired,
}

impl FromStr for ReactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "related" => Ok(ReactionKind::Related),
            "thoughtful" => Ok(ReactionKind::Thoughtful),
            "touched" => Ok(ReactionKind::Touched),
            "inspired" => Ok(ReactionKind::Inspired),
            other => Err(DomainError::Validation(format!(
                "unknown reaction kind: {other}"
            ))),
        }
    }
}

/// Binary poll choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollChoice {
    Yes,
    No,
}

impl FromStr for PollChoice {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(PollChoice::Yes),
            "no" => Ok(PollChoice::No),
            other => Err(DomainError::Validation(format!(
                "unknown poll choice: {other}"
            ))),
        }
    }
}

/// Reaction counters. Monotonically non-decreasing; no decrement
/// operation exists anywhere in the system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionCounts {
    pub related: u64,
    pub thoughtful: u64,
    pub touched: u64,
    pub inspired: u64,
}

impl ReactionCounts {
    pub fn get(&self, kind: ReactionKind) -> u64 {
        match kind {
            ReactionKind::Related => self.related,
            ReactionKind::Thoughtful => self.thoughtful,
            ReactionKind::Touched => self.touched,
            ReactionKind::Inspired => self.inspired,
        }
    }

    pub fn total(&self) -> u64 {
        self.related + self.thoughtful + self.touched + self.inspired
    }

    /// Accumulate another post's tallies into this one.
    pub fn merge(&mut self, other: &ReactionCounts) {
        self.related += other.related;
        self.thoughtful += other.thoughtful;
        self.touched += other.touched;
        self.inspired += other.inspired;
    }
}

/// Poll counters, same monotonicity rules as reactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollCounts {
    pub yes: u64,
    pub no: u64,
}

/// Post entity - a single anonymous submission.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    /// Unique, immutable, assigned once at creation and never recomputed.
    pub slug: String,
    /// Fresh pseudonymous identifier per submission; carries no PII and
    /// cannot correlate submissions from the same person.
    pub author_id: Uuid,
    pub review: ReviewState,
    pub reactions: ReactionCounts,
    pub poll: PollCounts,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post with zeroed counters and a fresh author id.
    pub fn new(
        title: String,
        content: String,
        tags: Vec<String>,
        slug: String,
        review: ReviewState,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            tags,
            slug,
            author_id: Uuid::new_v4(),
            review,
            reactions: ReactionCounts::default(),
            poll: PollCounts::default(),
            created_at: Utc::now(),
        }
    }

    /// Whether this post shares at least one tag with `other`.
    pub fn shares_tag_with(&self, other: &Post) -> bool {
        self.tags
            .iter()
            .any(|tag| other.tags.iter().any(|t| t == tag))
    }
}
