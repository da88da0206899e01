//! Synonym expansion and fuzzy matching.
//!
//! Advanced mode widens each query term into a group of weighted variants before running
//! the ordinary planner:
//!
//! - the term itself, weight 1.0
//! - its synonyms from the [`SynonymTable`], weight [`SYNONYM_WEIGHT`]
//! - when the term is not in the vocabulary, up to `max_fuzzy_matches` similar vocabulary
//!   terms, weight [`FUZZY_WEIGHT`] × similarity
//!
//! Fuzzy variants therefore always weigh less than exact ones. Matches are counted by how
//! they were reached: an article reachable through a verbatim or synonym variant is an
//! exact match, one reachable only through fuzzy variants is a fuzzy match.

use std::sync::Arc;

use serde::Serialize;
use sift_config::SearchSettings;
use sift_text::SynonymTable;

use crate::{
    Query, SearchIndex, fuzzy,
    search::{SearchPage, TermGroup, rank},
};

/// Weight of a synonym variant.
pub const SYNONYM_WEIGHT: f64 = 0.8;

/// Multiplier applied to the similarity of a fuzzy variant.
pub const FUZZY_WEIGHT: f64 = 0.5;

/// How an expanded term was derived from the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TermKind {
    /// Taken verbatim from the query.
    Exact,
    /// A synonym of a query term.
    Synonym,
    /// A vocabulary term similar to a query term.
    Fuzzy,
}

/// One term searched for on behalf of a query term.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpandedTerm {
    /// The term looked up in the index.
    pub term: String,
    /// The query term it stands in for.
    pub original: String,
    /// Score weight.
    pub weight: f64,
    /// How the term was derived.
    pub kind: TermKind,
}

/// A vocabulary term accepted as a fuzzy match for a query term.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzyMatch {
    /// The query term.
    pub original: String,
    /// The matched vocabulary term.
    pub fuzzy: String,
    /// Similarity in `[threshold, 1]`.
    pub similarity: f64,
}

/// The expanded form of a query.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Expansion {
    /// Every searched term, grouped by query term in query order.
    pub terms: Vec<ExpandedTerm>,
    /// Accepted fuzzy matches, best first within each query term.
    pub fuzzy_matches: Vec<FuzzyMatch>,
    /// Variant groups handed to the planner.
    #[serde(skip)]
    groups: Vec<TermGroup>,
}

impl Expansion {
    /// Returns the normalized query terms.
    pub fn originals(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|group| group.original.as_str())
    }

    /// Returns true if the query normalized to no terms.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Match counts and expansion details of an advanced search.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FuzzyReport {
    /// Filtered matches reachable through a verbatim or synonym term.
    pub exact_match_count: usize,
    /// Filtered matches reachable only through fuzzy terms.
    pub fuzzy_match_count: usize,
    /// How the query was expanded.
    pub expansion: Expansion,
}

/// Result of an advanced search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedResult {
    /// The requested page, scored.
    pub page: SearchPage,
    /// Filtered matches reachable through a verbatim or synonym term.
    pub exact_match_count: usize,
    /// Filtered matches reachable only through fuzzy terms.
    pub fuzzy_match_count: usize,
    /// How the query was expanded.
    pub expansion: Expansion,
}

impl AdvancedResult {
    /// Splits the result into its page and its match report.
    pub fn into_parts(self) -> (SearchPage, FuzzyReport) {
        (
            self.page,
            FuzzyReport {
                exact_match_count: self.exact_match_count,
                fuzzy_match_count: self.fuzzy_match_count,
                expansion: self.expansion,
            },
        )
    }
}

/// Expands query terms with synonyms and fuzzy matches.
#[derive(Debug, Clone)]
pub struct QueryExpander {
    /// Synonym lookup.
    synonyms: Arc<SynonymTable>,
    /// Minimum similarity for a fuzzy match.
    fuzzy_threshold: f64,
    /// Fuzzy matches kept per query term.
    max_fuzzy_matches: usize,
    /// Vocabulary terms compared per query term.
    fuzzy_sample_size: usize,
}

impl QueryExpander {
    /// Creates an expander with default search settings.
    pub fn new(synonyms: Arc<SynonymTable>) -> Self {
        Self::from_settings(synonyms, &SearchSettings::default())
    }

    /// Creates an expander from search settings.
    pub fn from_settings(synonyms: Arc<SynonymTable>, settings: &SearchSettings) -> Self {
        Self {
            synonyms,
            fuzzy_threshold: settings.fuzzy_threshold,
            max_fuzzy_matches: settings.max_fuzzy_matches,
            fuzzy_sample_size: settings.fuzzy_sample_size,
        }
    }

    /// Expands `text` against the vocabulary of `index`.
    pub fn expand(&self, text: &str, index: &SearchIndex) -> Expansion {
        let mut expansion = Expansion::default();

        for original in index.normalizer().normalize(text) {
            let mut group = TermGroup::exact(original.clone());

            for synonym in self.synonyms.lookup(&original) {
                group.add_variant(synonym.clone(), SYNONYM_WEIGHT, false);
            }

            if !index.terms().contains_term(&original) {
                let candidates = fuzzy::closest(
                    &original,
                    index.terms().vocabulary(),
                    self.fuzzy_threshold,
                    self.fuzzy_sample_size,
                    self.max_fuzzy_matches,
                );
                for candidate in candidates {
                    group.add_variant(
                        candidate.term.to_string(),
                        FUZZY_WEIGHT * candidate.similarity,
                        true,
                    );
                    expansion.fuzzy_matches.push(FuzzyMatch {
                        original: original.clone(),
                        fuzzy: candidate.term.to_string(),
                        similarity: candidate.similarity,
                    });
                }
            }

            expansion
                .terms
                .extend(group.variants.iter().enumerate().map(|(i, variant)| {
                    let kind = match (i, variant.fuzzy) {
                        (0, _) => TermKind::Exact,
                        (_, true) => TermKind::Fuzzy,
                        (_, false) => TermKind::Synonym,
                    };
                    ExpandedTerm {
                        term: variant.term.clone(),
                        original: original.clone(),
                        weight: variant.weight,
                        kind,
                    }
                }));
            expansion.groups.push(group);
        }

        expansion
    }

    /// Answers a query with synonym expansion and fuzzy matching.
    ///
    /// Scores are always materialized, whatever the sort mode.
    pub fn search(&self, index: &SearchIndex, query: &Query) -> AdvancedResult {
        let expansion = self.expand(query.text(), index);
        let ranked = rank(index, query, &expansion.groups, true);

        AdvancedResult {
            page: SearchPage::paginate(ranked.hits, query.page(), query.page_size()),
            exact_match_count: ranked.exact_count,
            fuzzy_match_count: ranked.fuzzy_count,
            expansion,
        }
    }
}

/// Answers a query in advanced mode using the built-in synonyms and default settings.
pub fn advanced_search(index: &SearchIndex, query: &Query) -> AdvancedResult {
    let synonyms = SynonymTable::builtin(index.normalizer());
    QueryExpander::new(Arc::new(synonyms)).search(index, query)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{Indexer, SortMode};

    fn index() -> SearchIndex {
        Indexer::default().build(&[
            json!({
                "id": "a1",
                "title": "인공지능 기술 혁신",
                "body": "인공지능 연구소가 새로운 모델을 공개했다",
                "publishDate": "2025-03-01"
            }),
            json!({
                "id": "a2",
                "title": "Battery prices fall",
                "body": "Battery makers cut prices again",
                "publishDate": "2025-04-01"
            }),
            json!({
                "id": "a3",
                "title": "반도체 수출 증가",
                "body": "반도체 수출이 크게 늘었다",
                "publishDate": "2025-05-01"
            }),
        ])
    }

    fn expander() -> QueryExpander {
        let index = index();
        QueryExpander::new(Arc::new(SynonymTable::builtin(index.normalizer())))
    }

    #[test]
    fn synonyms_reach_articles_without_the_query_term() {
        let index = index();
        let result = expander().search(&index, &Query::new("ai"));

        assert_eq!(result.page.ids().collect::<Vec<_>>(), ["a1"]);
        assert_eq!(result.exact_match_count, 1);
        assert_eq!(result.fuzzy_match_count, 0);

        let synonym = result
            .expansion
            .terms
            .iter()
            .find(|t| t.term == "인공지능")
            .unwrap();
        assert_eq!(synonym.kind, TermKind::Synonym);
        assert_eq!(synonym.original, "ai");
        assert!((synonym.weight - SYNONYM_WEIGHT).abs() < 1e-9);
    }

    #[test]
    fn fuzzy_match_corrects_typo() {
        let index = index();
        let result = expander().search(&index, &Query::new("인공지늠"));

        assert_eq!(result.page.ids().collect::<Vec<_>>(), ["a1"]);
        assert_eq!(result.exact_match_count, 0);
        assert_eq!(result.fuzzy_match_count, 1);

        let fuzzy = &result.expansion.fuzzy_matches[0];
        assert_eq!(fuzzy.original, "인공지늠");
        assert_eq!(fuzzy.fuzzy, "인공지능");
        assert!(fuzzy.similarity >= 0.7);
    }

    #[test]
    fn fuzzy_weight_stays_below_exact() {
        let index = index();
        let expansion = expander().expand("batery", &index);

        let fuzzy: Vec<_> = expansion
            .terms
            .iter()
            .filter(|t| t.kind == TermKind::Fuzzy)
            .collect();
        assert!(!fuzzy.is_empty());
        assert!(fuzzy.iter().all(|t| t.weight < 1.0 && t.weight > 0.0));
        assert!(fuzzy.iter().any(|t| t.term == "battery"));
    }

    #[test]
    fn exact_match_outranks_fuzzy_only_match() {
        let index = Indexer::default().build(&[
            json!({"id": "typo", "title": "Battary recycling", "body": "battary plants"}),
            json!({"id": "exact", "title": "Battery recycling", "body": "battery plants"}),
        ]);
        let settings = SearchSettings {
            fuzzy_threshold: 0.6,
            ..Default::default()
        };
        let expander = QueryExpander::from_settings(
            Arc::new(SynonymTable::builtin(index.normalizer())),
            &settings,
        );

        // "battery" is exact for one article; "batery" only fuzzes onto the other
        let result = expander.search(&index, &Query::new("battery batery"));
        let page = &result.page;

        assert_eq!(page.ids().collect::<Vec<_>>(), ["exact", "typo"]);
        assert_eq!(result.exact_match_count, 1);
        assert_eq!(result.fuzzy_match_count, 1);
        let exact = page.hits[0].score.unwrap();
        let fuzzy = page.hits[1].score.unwrap();
        assert!(fuzzy > 0.0);
        assert!(exact >= fuzzy, "exact {exact} < fuzzy {fuzzy}");
    }

    #[test]
    fn known_terms_are_not_fuzzed() {
        let index = index();
        let expansion = expander().expand("battery", &index);
        assert!(expansion.fuzzy_matches.is_empty());
        assert_eq!(expansion.originals().collect::<Vec<_>>(), ["battery"]);
    }

    #[test]
    fn scores_materialize_for_every_sort() {
        let index = index();
        let query = Query::new("battery").with_sort(SortMode::Newest);
        let result = expander().search(&index, &query);
        assert!(result.page.hits.iter().all(|hit| hit.score.is_some()));
    }

    #[test]
    fn blank_query_counts_everything_as_exact() {
        let index = index();
        let result = expander().search(&index, &Query::new(""));
        assert_eq!(result.exact_match_count, 3);
        assert_eq!(result.fuzzy_match_count, 0);
        assert!(result.expansion.is_empty());
    }

    #[test]
    fn free_function_uses_builtin_synonyms() {
        let index = index();
        let result = advanced_search(&index, &Query::new("semiconductor"));
        assert_eq!(result.page.ids().collect::<Vec<_>>(), ["a3"]);
    }

    #[test]
    fn report_keeps_counts() {
        let index = index();
        let (page, report) = expander().search(&index, &Query::new("ai")).into_parts();
        assert_eq!(page.total_count, 1);
        assert_eq!(report.exact_match_count, 1);
    }
}
