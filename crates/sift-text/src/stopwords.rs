//! Stop-word filtering for article terms.
//!
//! This module provides stop-word detection combining:
//! - Standard English stop-words from the `stop-words` crate
//! - Standard Korean stop-words from the same crate
//!
//! Both lists come from Stopwords ISO. A few short words on those lists are content
//! words in news text ("ai" is the common one) and are kept searchable.

use std::collections::HashSet;

use stop_words::LANGUAGE;

/// Listed stop-words that stay searchable.
const KEPT_TERMS: &[&str] = &["ai"];

/// A stop-word filter combining English and Korean stop-words.
///
/// Uses a `HashSet` for O(1) lookup. Words are stored in lowercase and lookups are
/// case-insensitive for ASCII.
#[derive(Debug, Clone)]
pub struct Stopwords {
    /// Lowercased stop-words.
    words: HashSet<String>,
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwords {
    /// Creates a stop-word filter with the English and Korean lists.
    pub fn new() -> Self {
        let mut words: HashSet<String> = HashSet::new();

        let mut add_words = |slice: &[&str]| {
            for word in slice {
                words.insert(word.to_ascii_lowercase());
            }
        };

        add_words(stop_words::get(LANGUAGE::English));
        add_words(stop_words::get(LANGUAGE::Korean));

        for kept in KEPT_TERMS {
            words.remove(*kept);
        }

        Self { words }
    }

    /// Checks if a term is a stop-word.
    ///
    /// The check is case-insensitive for ASCII characters.
    pub fn contains(&self, term: &str) -> bool {
        if term.bytes().any(|b| b.is_ascii_uppercase()) {
            return self.words.contains(&term.to_ascii_lowercase());
        }
        self.words.contains(term)
    }

    /// Returns the total number of stop-words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if no stop-words are configured.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
