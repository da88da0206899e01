//! Approximate term lookup against the index vocabulary.
//!
//! Similarity is the character-based normalized Levenshtein similarity,
//! `1 - distance / max(len_a, len_b)`, so it lies in `[0, 1]` and Hangul syllables count
//! as one character each.
//!
//! Comparing a term against a large vocabulary is bounded: only terms whose length could
//! still reach the threshold are considered, and at most `sample_size` of those, taken
//! from the sorted vocabulary around the term's own position and wrapping around.
//! Lexicographic neighbours share prefixes, so they are the likeliest matches.

use std::cmp::Ordering;

use strsim::normalized_levenshtein;

/// A vocabulary term similar to a query term.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Candidate<'a> {
    /// The vocabulary term.
    pub(crate) term: &'a str,
    /// Similarity to the query term, in `[threshold, 1]`.
    pub(crate) similarity: f64,
}

/// Returns the similarity of two terms.
pub(crate) fn similarity(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b)
}

/// Finds up to `limit` vocabulary terms at least `threshold` similar to `term`.
///
/// `vocabulary` must be sorted. The term itself is never returned. Results are ordered by
/// similarity descending, then term ascending.
pub(crate) fn closest<'a>(
    term: &str,
    vocabulary: &'a [String],
    threshold: f64,
    sample_size: usize,
    limit: usize,
) -> Vec<Candidate<'a>> {
    if vocabulary.is_empty() || limit == 0 || sample_size == 0 {
        return Vec::new();
    }

    let term_len = term.chars().count();
    let start = vocabulary
        .partition_point(|v| v.as_str() < term)
        .saturating_sub(sample_size / 2);
    let (tail, head) = vocabulary.split_at(start);

    let mut matches: Vec<Candidate<'a>> = head
        .iter()
        .chain(tail)
        .filter(|candidate| candidate.as_str() != term)
        .filter(|candidate| length_compatible(term_len, candidate.chars().count(), threshold))
        .take(sample_size)
        .filter_map(|candidate| {
            let similarity = similarity(term, candidate);
            (similarity >= threshold).then_some(Candidate {
                term: candidate.as_str(),
                similarity,
            })
        })
        .collect();

    matches.sort_by(|a, b| by_similarity(a, b));
    matches.truncate(limit);
    matches
}

/// Orders candidates by similarity descending, then term ascending.
fn by_similarity(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    b.similarity
        .total_cmp(&a.similarity)
        .then_with(|| a.term.cmp(b.term))
}

/// Returns true if two lengths are close enough for their similarity to reach `threshold`.
///
/// The edit distance is at least the length difference, which bounds the similarity
/// from above.
fn length_compatible(a: usize, b: usize, threshold: f64) -> bool {
    let longest = a.max(b);
    if longest == 0 {
        return true;
    }
    let diff = a.abs_diff(b) as f64;
    diff <= (1.0 - threshold) * longest as f64
}
