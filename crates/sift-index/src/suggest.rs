//! Spelling corrections and related terms.

use std::{collections::HashSet, sync::Arc};

use serde::Serialize;
use sift_config::SearchSettings;
use sift_text::SynonymTable;

use crate::{SearchIndex, fuzzy};

/// Suggested replacements for one unknown query term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Correction {
    /// The query term, as normalized.
    pub original: String,
    /// Vocabulary terms, most similar first.
    pub suggestions: Vec<String>,
}

/// Corrections and related terms for a query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Suggestions {
    /// One entry per unknown query term that has close vocabulary terms.
    pub corrections: Vec<Correction>,
    /// Synonyms of the query terms, excluding the query terms themselves.
    pub related: Vec<String>,
}

impl Suggestions {
    /// Returns true if there is nothing to suggest.
    pub fn is_empty(&self) -> bool {
        self.corrections.is_empty() && self.related.is_empty()
    }
}

/// Produces [`Suggestions`] for query text.
#[derive(Debug, Clone)]
pub struct Suggester {
    /// Synonym lookup for related terms.
    synonyms: Arc<SynonymTable>,
    /// Minimum similarity for a correction.
    threshold: f64,
    /// Corrections offered per unknown term.
    limit: usize,
    /// Vocabulary terms compared per unknown term.
    sample_size: usize,
}

impl Suggester {
    /// Creates a suggester with default search settings.
    pub fn new(synonyms: Arc<SynonymTable>) -> Self {
        Self::from_settings(synonyms, &SearchSettings::default())
    }

    /// Creates a suggester from search settings.
    pub fn from_settings(synonyms: Arc<SynonymTable>, settings: &SearchSettings) -> Self {
        Self {
            synonyms,
            threshold: settings.fuzzy_threshold,
            limit: settings.suggestion_limit,
            sample_size: settings.fuzzy_sample_size,
        }
    }

    /// Suggests corrections and related terms for `text`.
    ///
    /// Never fails: text with no usable terms yields empty suggestions.
    pub fn suggest(&self, text: &str, index: &SearchIndex) -> Suggestions {
        let terms = index.normalizer().normalize(text);
        let vocabulary = index.terms().vocabulary();

        let corrections = terms
            .iter()
            .filter(|term| !index.terms().contains_term(term))
            .filter_map(|term| {
                let suggestions: Vec<String> =
                    fuzzy::closest(term, vocabulary, self.threshold, self.sample_size, self.limit)
                        .into_iter()
                        .map(|candidate| candidate.term.to_string())
                        .collect();
                (!suggestions.is_empty()).then(|| Correction {
                    original: term.clone(),
                    suggestions,
                })
            })
            .collect();

        let query_terms: HashSet<&str> = terms.iter().map(String::as_str).collect();
        let mut seen = HashSet::new();
        let related = terms
            .iter()
            .flat_map(|term| self.synonyms.lookup(term))
            .filter(|synonym| !query_terms.contains(synonym.as_str()))
            .filter(|synonym| seen.insert(synonym.as_str()))
            .cloned()
            .collect();

        Suggestions {
            corrections,
            related,
        }
    }
}
