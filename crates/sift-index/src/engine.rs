//! The engine facade tying the cache, planner, expander and suggester together.

use std::sync::Arc;

use serde::Serialize;
use sift_config::Config;
use sift_text::SynonymTable;

use crate::{
    Article, CorpusStore, FuzzyReport, IndexCache, Indexer, Metadata, Query, QueryExpander,
    SearchIndex, SearchPage, Suggester, Suggestions, search::search,
};

/// Answers queries against one corpus store.
///
/// Construct once per process and share by reference. Every call works on a single
/// index snapshot, so a concurrent rebuild never mixes two corpora into one answer.
#[derive(Debug)]
pub struct SearchEngine<S> {
    /// Index lifecycle.
    cache: IndexCache<S>,
    /// Synonym and fuzzy expansion for advanced queries.
    expander: QueryExpander,
    /// Corrections and related terms.
    suggester: Suggester,
    /// Page size applied to requests that name none.
    default_page_size: usize,
}

impl<S: CorpusStore> SearchEngine<S> {
    /// Creates an engine for `store` using the settings in `config`.
    pub fn new(store: S, config: &Config) -> Self {
        let indexer = Indexer::new(&config.index);
        let synonyms = Arc::new(SynonymTable::with_configured(
            indexer.normalizer(),
            &config.synonyms,
        ));

        Self {
            expander: QueryExpander::from_settings(Arc::clone(&synonyms), &config.search),
            suggester: Suggester::from_settings(synonyms, &config.search),
            cache: IndexCache::new(store, indexer),
            default_page_size: config.search.page_size,
        }
    }

    /// Answers a query.
    ///
    /// Advanced queries are expanded with synonyms and fuzzy matches and carry a match
    /// report and suggestions.
    pub fn search(&self, query: &Query) -> SearchResponse {
        let index = self.cache.get();

        if !query.is_advanced() {
            return SearchResponse {
                page: search(&index, query),
                fuzzy: None,
                suggestions: None,
                snapshot: index,
            };
        }

        let (page, report) = self.expander.search(&index, query).into_parts();
        let suggestions = self.suggester.suggest(query.text(), &index);
        SearchResponse {
            page,
            fuzzy: Some(report),
            suggestions: Some(suggestions),
            snapshot: index,
        }
    }

    /// Suggests corrections and related terms for `text`.
    pub fn suggest(&self, text: &str) -> Suggestions {
        self.suggester.suggest(text, &self.cache.get())
    }

    /// Returns the authors, sources and date span of the current corpus.
    pub fn metadata(&self) -> Metadata {
        self.cache.get().metadata().clone()
    }

    /// Returns the current index, rebuilding it first if it is stale.
    pub fn index(&self) -> Arc<SearchIndex> {
        self.cache.get()
    }

    /// Forces the next call to rebuild the index.
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }

    /// Returns the number of completed index builds.
    pub fn generation(&self) -> u64 {
        self.cache.generation()
    }

    /// Returns the corpus store.
    pub fn store(&self) -> &S {
        self.cache.store()
    }

    /// Returns the page size applied to requests that name none.
    pub fn default_page_size(&self) -> usize {
        self.default_page_size
    }
}

/// An answered query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// The requested page.
    #[serde(flatten)]
    pub page: SearchPage,
    /// Match counts and expansion, for advanced queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuzzy: Option<FuzzyReport>,
    /// Corrections and related terms, for advanced queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Suggestions>,
    /// The index the page was computed from.
    #[serde(skip)]
    snapshot: Arc<SearchIndex>,
}

/// A hit paired with its article.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedHit<'a> {
    /// The matching article.
    #[serde(flatten)]
    pub article: &'a Article,
    /// Relevance score, when materialized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl SearchResponse {
    /// Pairs the page's hits with their articles, in rank order.
    pub fn resolve(&self) -> Vec<ResolvedHit<'_>> {
        self.page
            .hits
            .iter()
            .filter_map(|hit| {
                self.snapshot.article(&hit.id).map(|article| ResolvedHit {
                    article,
                    score: hit.score,
                })
            })
            .collect()
    }

    /// Returns the index snapshot the page was computed from.
    pub fn snapshot(&self) -> &SearchIndex {
        &self.snapshot
    }
}
