//! Text normalization into searchable terms.
//!
//! A [`Normalizer`] turns raw, possibly markup-bearing text into canonical terms:
//!
//! 1. Strip markup and decode character references
//! 2. Lowercase
//! 3. Replace everything except ASCII letters, digits, Hangul and whitespace with a space
//! 4. Split on whitespace
//! 5. Drop tokens shorter than the minimum length (counted in characters)
//! 6. Drop stop-words
//!
//! The same normalizer is used for article text at index time and for query text at
//! search time, so both sides agree on what a term is.
//!
//! Step 1 runs exactly once per text. Article bodies are stripped when the article is
//! built and the stripped text goes through the `*_plain` methods afterwards, so an
//! escaped `&lt;script&gt;` in the body stays text instead of becoming a tag.
//!
//! # Examples
//!
//! ```
//! use sift_text::Normalizer;
//!
//! let normalizer = Normalizer::default();
//! assert_eq!(
//!     normalizer.normalize("<h1>AI 기술, the AI 혁신!</h1>"),
//!     vec!["ai", "기술", "혁신"]
//! );
//! ```

use std::collections::{HashMap, HashSet};

use crate::{markup::strip_markup, stopwords::Stopwords};

/// Default minimum term length in characters.
pub const DEFAULT_MIN_TERM_LENGTH: usize = 2;

/// Converts text into normalized terms.
#[derive(Debug, Clone)]
pub struct Normalizer {
    /// Tokens with fewer characters than this are dropped.
    min_term_length: usize,
    /// Function words to drop.
    stopwords: Stopwords,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_TERM_LENGTH)
    }
}

impl Normalizer {
    /// Creates a normalizer with the built-in stop-word lists.
    ///
    /// A `min_term_length` of zero is treated as one: empty tokens are never produced.
    pub fn new(min_term_length: usize) -> Self {
        Self {
            min_term_length: min_term_length.max(1),
            stopwords: Stopwords::new(),
        }
    }

    /// Returns the minimum term length in characters.
    pub fn min_term_length(&self) -> usize {
        self.min_term_length
    }

    /// Returns the distinct terms of `text` in first-occurrence order.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        dedup(self.tokenize(text))
    }

    /// Like [`normalize`](Self::normalize) for text that has already been stripped.
    pub fn normalize_plain(&self, text: &str) -> Vec<String> {
        dedup(self.tokenize_plain(text))
    }

    /// Returns every term of `text` in order, repeats included.
    ///
    /// Use this when term frequency matters.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.tokenize_plain(&strip_markup(text))
    }

    /// Like [`tokenize`](Self::tokenize) for text that has already been stripped.
    ///
    /// Angle brackets and entities are treated as punctuation.
    pub fn tokenize_plain(&self, text: &str) -> Vec<String> {
        let cleaned: String = text
            .to_lowercase()
            .chars()
            .map(|c| if is_term_char(c) { c } else { ' ' })
            .collect();

        cleaned
            .split_whitespace()
            .filter(|token| self.is_term(token))
            .map(str::to_string)
            .collect()
    }

    /// Returns the `limit` most frequent terms of already stripped `text`, most
    /// frequent first.
    ///
    /// Ties are broken by first occurrence.
    pub fn extract_keywords(&self, text: &str, limit: usize) -> Vec<String> {
        rank_by_frequency(self.tokenize_plain(text), limit)
    }

    /// Checks whether an already-cleaned token qualifies as a term.
    fn is_term(&self, token: &str) -> bool {
        token.chars().count() >= self.min_term_length && !self.stopwords.contains(token)
    }
}

/// Drops repeated terms, keeping first occurrences in order.
fn dedup(terms: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    terms
        .into_iter()
        .filter(|term| seen.insert(term.clone()))
        .collect()
}

/// Returns the `limit` most frequent tokens, ties broken by first occurrence.
fn rank_by_frequency(tokens: Vec<String>, limit: usize) -> Vec<String> {
    // term -> (count, first position)
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (position, token) in tokens.into_iter().enumerate() {
        counts
            .entry(token)
            .and_modify(|(count, _)| *count += 1)
            .or_insert((1, position));
    }

    let mut ranked: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(term, (count, first))| (term, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.truncate(limit);
    ranked.into_iter().map(|(term, _, _)| term).collect()
}

/// Returns true for characters that may appear inside a term.
///
/// Terms are made of ASCII letters and digits plus Hangul syllables and jamo.
pub fn is_term_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || is_hangul(c)
}

/// Returns true for Hangul syllables and jamo.
fn is_hangul(c: char) -> bool {
    matches!(c,
        '\u{AC00}'..='\u{D7A3}' |  // Hangul Syllables
        '\u{1100}'..='\u{11FF}' |  // Hangul Jamo
        '\u{3130}'..='\u{318F}' |  // Hangul Compatibility Jamo
        '\u{A960}'..='\u{A97F}' |  // Hangul Jamo Extended-A
        '\u{D7B0}'..='\u{D7FF}'    // Hangul Jamo Extended-B
    )
}
