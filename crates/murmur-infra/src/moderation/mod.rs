//! Content admission implementations.

mod deny_list;

pub use deny_list::{DenyListModerator, ModerationConfig};
