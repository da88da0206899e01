//! Result ordering.
//!
//! Every mode ends with an id tie-break so results are deterministic regardless of
//! hash-map iteration order.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::{Article, SortMode};

/// An article with its materialized score, if any.
#[derive(Debug)]
pub(crate) struct Scored<'a> {
    /// The matching article.
    pub(crate) article: &'a Article,
    /// Relevance score, when materialized.
    pub(crate) score: Option<f64>,
}

/// Sorts matches in place.
pub(crate) fn sort(matches: &mut [Scored<'_>], mode: SortMode) {
    match mode {
        SortMode::Newest => matches.sort_by(|a, b| {
            newest_first(a.article.published_at, b.article.published_at)
                .then_with(|| by_id(a, b))
        }),
        SortMode::Oldest => matches.sort_by(|a, b| {
            oldest_first(a.article.published_at, b.article.published_at)
                .then_with(|| by_id(a, b))
        }),
        SortMode::Title => {
            matches.sort_by_cached_key(|s| (s.article.title.to_lowercase(), s.article.id.clone()));
        }
        SortMode::Relevance => matches.sort_by(|a, b| {
            let a_score = a.score.unwrap_or(0.0);
            let b_score = b.score.unwrap_or(0.0);
            b_score
                .total_cmp(&a_score)
                .then_with(|| newest_first(a.article.published_at, b.article.published_at))
                .then_with(|| by_id(a, b))
        }),
    }
}

/// Orders by id ascending.
fn by_id(a: &Scored<'_>, b: &Scored<'_>) -> Ordering {
    a.article.id.cmp(&b.article.id)
}

/// Orders dates descending, undated last.
fn newest_first(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Orders dates ascending, undated last.
fn oldest_first(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
