//! Deny-list moderator - a substring safety net, not a classifier.

use murmur_core::ports::Moderator;

/// Terms that make a submission inadmissible.
#[derive(Debug, Clone)]
pub struct ModerationConfig {
    pub denied_terms: Vec<String>,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            denied_terms: ["casino", "free money", "buy now", "lottery winner"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl ModerationConfig {
    /// `DENY_LIST` env var, comma-separated; falls back to the built-in
    /// list when unset.
    pub fn from_env() -> Self {
        match std::env::var("DENY_LIST") {
            Ok(raw) => Self {
                denied_terms: raw
                    .split(',')
                    .map(|term| term.trim().to_string())
                    .filter(|term| !term.is_empty())
                    .collect(),
            },
            Err(_) => Self::default(),
        }
    }
}

/// Case-insensitive substring match against the configured terms.
pub struct DenyListModerator {
    terms: Vec<String>,
}

impl DenyListModerator {
    pub fn new(config: ModerationConfig) -> Self {
        Self {
            terms: config
                .denied_terms
                .into_iter()
                .map(|term| term.to_lowercase())
                .collect(),
        }
    }
}

impl Moderator for DenyListModerator {
    fn is_admissible(&self, text: &str) -> bool {
        let haystack = text.to_lowercase();
        !self.terms.iter().any(|term| haystack.contains(term))
    }
}
