//! Inverted index: term to article-id membership.
//!
//! Postings record membership only. Term frequencies are recomputed from article text at
//! scoring time, so the index stays small and is never out of sync with the articles.

use std::collections::{HashMap, HashSet};

/// Mapping from normalized term to the ids of articles containing it.
///
/// No term maps to an empty set. The vocabulary is kept sorted for fuzzy lookups.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    /// Term -> ids of the articles that contain it.
    postings: HashMap<String, HashSet<String>>,
    /// All terms, sorted ascending.
    vocabulary: Vec<String>,
}

impl InvertedIndex {
    /// Builds an index from raw postings, pruning terms with no articles.
    pub fn new(mut postings: HashMap<String, HashSet<String>>) -> Self {
        postings.retain(|_, ids| !ids.is_empty());
        let mut vocabulary: Vec<String> = postings.keys().cloned().collect();
        vocabulary.sort_unstable();
        Self {
            postings,
            vocabulary,
        }
    }

    /// Returns the ids of articles containing `term`.
    pub fn postings(&self, term: &str) -> Option<&HashSet<String>> {
        self.postings.get(term)
    }

    /// Returns true if `term` occurs in any article.
    pub fn contains_term(&self, term: &str) -> bool {
        self.postings.contains_key(term)
    }

    /// Returns every term, sorted ascending.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Iterates over `(term, ids)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HashSet<String>)> {
        self.postings.iter().map(|(term, ids)| (term.as_str(), ids))
    }

    /// Returns the number of distinct terms.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    /// Returns true if the index holds no terms.
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}
