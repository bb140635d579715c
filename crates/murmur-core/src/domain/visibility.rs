//! Public visibility - decided at query time, never cached on the entity.

use super::{Post, ReviewState};

/// Whether a post is servable to the public feed.
///
/// Only approval makes a post visible; there is no recency carve-out.
/// A post that leaves the approved state disappears from public reads on
/// the very next query.
pub fn is_public(post: &Post) -> bool {
    post.review == ReviewState::Approved
}
