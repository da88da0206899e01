//! Query planning and execution.
//!
//! [`search`] answers a validated [`Query`] against one [`SearchIndex`] snapshot.
//!
//! # Algorithm
//!
//! 1. **Candidate selection**: A blank query selects every article. Otherwise the query
//!    text is normalized into terms and the candidates are the union (OR) of the postings
//!    of every term. Text that normalizes to no terms selects nothing.
//!
//! 2. **Filtering**: Date window, sources and authors. See [`Filters`](crate::Filters).
//!
//! 3. **Scoring**: Only materialized for relevance ordering or advanced mode. Each query
//!    term contributes the best of its variants' weighted, length-normalized frequencies
//!    in title, keywords and body; contributions are averaged over the query terms, and
//!    a title containing the whole query text earns a fixed bonus. See [`score`].
//!
//! 4. **Sorting**: Newest, oldest, title or relevance, always with a deterministic
//!    tie-break on id. See [`sort`].
//!
//! 5. **Pagination**: Pages beyond the last one are empty, not an error.
//!
//! Advanced mode feeds extra term variants (synonyms and fuzzy matches) through the same
//! pipeline; see [`crate::advanced`].

mod score;
mod sort;

use std::collections::HashMap;

use serde::Serialize;
use sift_text::Normalizer;
use tracing::{debug, warn};

use crate::{Article, Query, SearchIndex, SortMode};

/// Weight of a term taken verbatim from the query.
pub(crate) const EXACT_WEIGHT: f64 = 1.0;

/// One ranked result: an article id and, when materialized, its score.
///
/// Scores are only comparable within one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    /// Article id.
    pub id: String,
    /// Relevance score, present for relevance ordering and advanced mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// One page of ranked results plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    /// Hits on this page, in rank order.
    pub hits: Vec<SearchHit>,
    /// Matching articles across all pages.
    pub total_count: usize,
    /// 1-based page number.
    pub current_page: usize,
    /// Number of non-empty pages.
    pub total_pages: usize,
    /// True if a later page has hits.
    pub has_next_page: bool,
    /// True if this is not the first page.
    pub has_prev_page: bool,
}

impl SearchPage {
    /// Slices one page out of the fully ranked hits.
    pub(crate) fn paginate(ranked: Vec<SearchHit>, page: usize, page_size: usize) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let total_count = ranked.len();
        let total_pages = total_count.div_ceil(page_size);
        let start = (page - 1).saturating_mul(page_size);

        Self {
            hits: ranked.into_iter().skip(start).take(page_size).collect(),
            total_count,
            current_page: page,
            total_pages,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        }
    }

    /// Iterates over the ids on this page.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.hits.iter().map(|hit| hit.id.as_str())
    }

    /// Returns true if this page has no hits.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// A term that may stand in for a query term, with its score weight.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Variant {
    /// Normalized term looked up in the inverted index.
    pub(crate) term: String,
    /// Multiplier on the term's frequency contribution.
    pub(crate) weight: f64,
    /// True if the variant came from fuzzy matching.
    pub(crate) fuzzy: bool,
}

/// One normalized query term and every variant that may stand in for it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TermGroup {
    /// The query term as normalized.
    pub(crate) original: String,
    /// Variants, the original itself first.
    pub(crate) variants: Vec<Variant>,
}

impl TermGroup {
    /// Creates a group holding only the exact term.
    pub(crate) fn exact(term: String) -> Self {
        Self {
            variants: vec![Variant {
                term: term.clone(),
                weight: EXACT_WEIGHT,
                fuzzy: false,
            }],
            original: term,
        }
    }

    /// Adds a variant, keeping the higher weight if the term is already present.
    pub(crate) fn add_variant(&mut self, term: String, weight: f64, fuzzy: bool) {
        if let Some(existing) = self.variants.iter_mut().find(|v| v.term == term) {
            if weight > existing.weight {
                existing.weight = weight;
                existing.fuzzy = fuzzy;
            }
            return;
        }
        self.variants.push(Variant {
            term,
            weight,
            fuzzy,
        });
    }
}

/// Builds one exact-only group per normalized query term.
pub(crate) fn exact_groups(normalizer: &Normalizer, text: &str) -> Vec<TermGroup> {
    normalizer
        .normalize(text)
        .into_iter()
        .map(TermGroup::exact)
        .collect()
}

/// Fully ranked results of one query, before pagination.
#[derive(Debug, Clone, Default)]
pub(crate) struct Ranked {
    /// Every matching article in rank order.
    pub(crate) hits: Vec<SearchHit>,
    /// Matches reachable through an exact or synonym variant.
    pub(crate) exact_count: usize,
    /// Matches reachable only through fuzzy variants.
    pub(crate) fuzzy_count: usize,
}

/// Answers a query with exact term matching.
pub fn search(index: &SearchIndex, query: &Query) -> SearchPage {
    let groups = exact_groups(index.normalizer(), query.text());
    let ranked = rank(index, query, &groups, false);
    SearchPage::paginate(ranked.hits, query.page(), query.page_size())
}

/// Selects, filters, scores and sorts every match for `groups`.
pub(crate) fn rank(
    index: &SearchIndex,
    query: &Query,
    groups: &[TermGroup],
    always_score: bool,
) -> Ranked {
    let candidates = select_candidates(index, query, groups);
    let selected = candidates.len();

    let filters = query.filters();
    let matched: Vec<(&Article, bool)> = candidates
        .into_iter()
        .filter(|(article, _)| filters.matches(article))
        .collect();

    let exact_count = matched.iter().filter(|(_, exact)| *exact).count();
    let fuzzy_count = matched.len() - exact_count;

    let materialize = always_score || query.sort() == SortMode::Relevance;
    let mut scored: Vec<sort::Scored<'_>> = matched
        .into_iter()
        .map(|(article, _)| sort::Scored {
            article,
            score: materialize
                .then(|| score::score(article, groups, query.text(), index.normalizer())),
        })
        .collect();
    sort::sort(&mut scored, query.sort());

    debug!(
        terms = groups.len(),
        selected,
        matched = scored.len(),
        sort = %query.sort(),
        "planned query"
    );

    Ranked {
        hits: scored
            .into_iter()
            .map(|s| SearchHit {
                id: s.article.id.clone(),
                score: s.score,
            })
            .collect(),
        exact_count,
        fuzzy_count,
    }
}

/// Collects candidate articles, flagging those reachable through a non-fuzzy variant.
fn select_candidates<'a>(
    index: &'a SearchIndex,
    query: &Query,
    groups: &[TermGroup],
) -> Vec<(&'a Article, bool)> {
    if query.is_blank() {
        return index.articles().map(|article| (article, true)).collect();
    }

    let mut reached: HashMap<&'a str, bool> = HashMap::new();
    for variant in groups.iter().flat_map(|group| &group.variants) {
        let Some(ids) = index.terms().postings(&variant.term) else {
            continue;
        };
        for id in ids {
            let exact = reached.entry(id.as_str()).or_insert(false);
            *exact |= !variant.fuzzy;
        }
    }

    reached
        .into_iter()
        .filter_map(|(id, exact)| match index.article(id) {
            Some(article) => Some((article, exact)),
            None => {
                warn!(id, "dropping posting with no backing article");
                None
            }
        })
        .collect()
}
