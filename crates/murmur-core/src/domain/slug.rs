//! Slug assignment - normalized title plus a short random suffix.

use rand::Rng;

const SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const DEFAULT_SUFFIX_LEN: usize = 6;
const EMPTY_TITLE_FALLBACK: &str = "post";

/// Generates URL-safe slugs for new posts.
///
/// Normalization is deterministic; only the suffix is random, so two posts
/// with identical titles still receive distinct slugs. The base36 suffix
/// space (36^6) keeps the collision probability negligible at expected
/// volumes, and the submission path still retries once on a collision.
#[derive(Debug, Clone)]
pub struct SlugGenerator {
    suffix_len: usize,
}

impl Default for SlugGenerator {
    fn default() -> Self {
        Self {
            suffix_len: DEFAULT_SUFFIX_LEN,
        }
    }
}

impl SlugGenerator {
    pub fn new(suffix_len: usize) -> Self {
        Self { suffix_len }
    }

    pub fn generate(&self, title: &str) -> String {
        let stem = Self::normalize(title);
        let stem = if stem.is_empty() {
            EMPTY_TITLE_FALLBACK
        } else {
            &stem
        };
        format!("{stem}-{}", self.suffix())
    }

    /// Lowercase the title, collapse non-alphanumeric runs to a single
    /// `-`, and strip leading/trailing separators.
    fn normalize(title: &str) -> String {
        let mut out = String::with_capacity(title.len());
        for c in title.chars() {
            if c.is_ascii_alphanumeric() {
                out.push(c.to_ascii_lowercase());
            } else if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
        }
        out.trim_end_matches('-').to_string()
    }

    fn suffix(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.suffix_len)
            .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stem_of(slug: &str) -> &str {
        let (stem, _) = slug.rsplit_once('-').unwrap();
        stem
    }

    #[test]
    fn normalizes_title_into_stem() {
        let slug = SlugGenerator::default().generate("Hello, World!");
        assert_eq!(stem_of(&slug), "hello-world");
    }

    #[test]
    fn collapses_separator_runs_and_trims_edges() {
        let slug = SlugGenerator::default().generate("  --Fresh   start?!  ");
        assert_eq!(stem_of(&slug), "fresh-start");
    }

    #[test]
    fn falls_back_for_titles_without_usable_characters() {
        let slug = SlugGenerator::default().generate("!!!???");
        assert_eq!(stem_of(&slug), "post");
    }

    #[test]
    fn suffix_is_lowercase_base36_of_configured_length() {
        let slug = SlugGenerator::new(8).generate("Hello");
        let (_, suffix) = slug.rsplit_once('-').unwrap();
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn identical_titles_get_distinct_slugs() {
        let slugs = SlugGenerator::default();
        assert_ne!(slugs.generate("Hello"), slugs.generate("Hello"));
    }
}
