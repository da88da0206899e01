//! Relevance scoring.
//!
//! For one article and one query, each query term contributes
//!
//! ```text
//! max over variants of  weight × (3·tf_title + 2·in_keywords + 1·tf_body) / 6
//! ```
//!
//! where `tf_x` is the term's occurrences in `x` divided by the number of terms in `x`,
//! and `in_keywords` is 1 when the term is one of the article's keywords. Contributions
//! are averaged over the query terms, so a term-level score lies in `[0, 1]`. A title
//! that contains the whole query text adds [`TITLE_PHRASE_BONUS`].
//!
//! Frequencies are recomputed from the article text here; the inverted index only
//! records membership.

use std::collections::HashMap;

use sift_text::Normalizer;

use super::TermGroup;
use crate::Article;

/// Weight of title frequency.
const TITLE_WEIGHT: f64 = 3.0;

/// Weight of keyword membership.
const KEYWORD_WEIGHT: f64 = 2.0;

/// Weight of body frequency.
const BODY_WEIGHT: f64 = 1.0;

/// Sum of the field weights, used to keep a term's contribution within `[0, 1]`.
const TOTAL_WEIGHT: f64 = TITLE_WEIGHT + KEYWORD_WEIGHT + BODY_WEIGHT;

/// Added when the title contains the whole query text.
pub(crate) const TITLE_PHRASE_BONUS: f64 = 0.25;

/// Term counts of one text field.
struct FieldCounts<'a> {
    /// Occurrences per term.
    counts: HashMap<&'a str, usize>,
    /// Total number of terms in the field.
    total: usize,
}

impl<'a> FieldCounts<'a> {
    /// Counts terms in an already tokenized field.
    fn new(tokens: &'a [String]) -> Self {
        let mut counts = HashMap::new();
        for token in tokens {
            *counts.entry(token.as_str()).or_insert(0) += 1;
        }
        Self {
            counts,
            total: tokens.len(),
        }
    }

    /// Returns the relative frequency of `term`, 0 for an empty field.
    fn frequency(&self, term: &str) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let count = self.counts.get(term).copied().unwrap_or(0);
        count as f64 / self.total as f64
    }
}

/// Scores one article against the query's term groups.
pub(crate) fn score(
    article: &Article,
    groups: &[TermGroup],
    query_text: &str,
    normalizer: &Normalizer,
) -> f64 {
    let mut total = 0.0;

    if !groups.is_empty() {
        let title_tokens = normalizer.tokenize(&article.title);
        let body_tokens = normalizer.tokenize_plain(&article.searchable_content);
        let title = FieldCounts::new(&title_tokens);
        let body = FieldCounts::new(&body_tokens);

        let sum: f64 = groups
            .iter()
            .map(|group| {
                group
                    .variants
                    .iter()
                    .map(|variant| {
                        let in_keywords = article.keywords.contains(&variant.term);
                        let raw = TITLE_WEIGHT * title.frequency(&variant.term)
                            + KEYWORD_WEIGHT * f64::from(u8::from(in_keywords))
                            + BODY_WEIGHT * body.frequency(&variant.term);
                        variant.weight * raw / TOTAL_WEIGHT
                    })
                    .fold(0.0, f64::max)
            })
            .sum();
        total = sum / groups.len() as f64;
    }

    if title_contains_phrase(&article.title, query_text) {
        total += TITLE_PHRASE_BONUS;
    }

    total
}

/// Returns true if the lowercased title contains the whole trimmed query text.
fn title_contains_phrase(title: &str, query_text: &str) -> bool {
    let phrase = query_text.trim().to_lowercase();
    !phrase.is_empty() && title.to_lowercase().contains(&phrase)
}
