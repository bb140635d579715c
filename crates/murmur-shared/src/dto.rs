//! Data Transfer Objects - request/response types for the API.
//!
//! Response field names are camelCase to match the public JSON contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to submit a new post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitPostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request to add a reaction. The kind is validated server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactRequest {
    pub kind: String,
}

/// Request to cast a poll vote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteRequest {
    pub choice: String,
}

/// Admin request to flag or unflag a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlagRequest {
    pub flagged: bool,
}

/// Admin request to change a post's workflow status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

/// Admin verification request - the shared secret in the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub password: String,
}

/// Session value handed back on successful verification; the client
/// replays it in the `X-Admin-Token` header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSession {
    pub token: String,
}

/// Reaction counters on the wire.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ReactionTally {
    pub related: u64,
    pub thoughtful: u64,
    pub touched: u64,
    pub inspired: u64,
}

/// Poll counters on the wire.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PollTally {
    pub yes: u64,
    pub no: u64,
}

/// A post as served to clients.
///
/// `status` and `flagged` are projections of the server-side review
/// state and always move together: a flagged post is rejected and a
/// rejected post is flagged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub slug: String,
    pub author_id: Uuid,
    pub status: String,
    pub flagged: bool,
    pub reactions: ReactionTally,
    pub poll: PollTally,
    pub created_at: DateTime<Utc>,
}
