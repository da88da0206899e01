//! The search index aggregate.

use std::collections::HashMap;

use serde::Serialize;
use sift_text::Normalizer;

use crate::{Article, InvertedIndex, Metadata};

/// Counters describing one index build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildStats {
    /// Records read from the corpus.
    pub records_seen: usize,
    /// Articles added to the index.
    pub articles_indexed: usize,
    /// Records skipped because they were not objects or had a non-string body.
    pub records_skipped: usize,
    /// Records dropped for lacking an id.
    pub missing_ids: usize,
    /// Records dropped because an earlier record had the same id.
    pub duplicate_ids: usize,
    /// Indexed articles whose publish date could not be parsed.
    pub unparsed_dates: usize,
    /// Distinct terms in the inverted index.
    pub terms: usize,
}

impl BuildStats {
    /// Returns the number of records that did not become articles.
    pub fn records_dropped(&self) -> usize {
        self.records_skipped + self.missing_ids + self.duplicate_ids
    }

    /// Returns true if every record became an article.
    pub fn is_clean(&self) -> bool {
        self.records_dropped() == 0
    }
}

/// One immutable snapshot of the corpus: articles, inverted index and metadata.
///
/// A `SearchIndex` is built as a whole by the [`Indexer`](crate::Indexer), shared behind an
/// `Arc`, and never mutated. It also carries the [`Normalizer`] it was built with so that
/// queries are normalized exactly like the articles were.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    /// Articles by id.
    articles: HashMap<String, Article>,
    /// Term -> article ids.
    terms: InvertedIndex,
    /// Authors, sources and date span.
    metadata: Metadata,
    /// Counters from the build that produced this snapshot.
    stats: BuildStats,
    /// Normalizer used for article text, reused for query text.
    normalizer: Normalizer,
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::empty(Normalizer::default())
    }
}

impl SearchIndex {
    /// Assembles an index from its parts.
    pub(crate) fn new(
        articles: HashMap<String, Article>,
        terms: InvertedIndex,
        metadata: Metadata,
        stats: BuildStats,
        normalizer: Normalizer,
    ) -> Self {
        Self {
            articles,
            terms,
            metadata,
            stats,
            normalizer,
        }
    }

    /// Returns an index with no articles, no terms and a null date range.
    pub fn empty(normalizer: Normalizer) -> Self {
        Self::new(
            HashMap::new(),
            InvertedIndex::default(),
            Metadata::default(),
            BuildStats::default(),
            normalizer,
        )
    }

    /// Returns the article with the given id.
    pub fn article(&self, id: &str) -> Option<&Article> {
        self.articles.get(id)
    }

    /// Iterates over all articles in no particular order.
    pub fn articles(&self) -> impl Iterator<Item = &Article> {
        self.articles.values()
    }

    /// Returns the inverted index.
    pub fn terms(&self) -> &InvertedIndex {
        &self.terms
    }

    /// Returns the corpus metadata.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Returns the counters from the build that produced this index.
    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Returns the normalizer shared by articles and queries.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Returns the number of articles.
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Returns true if the index holds no articles.
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}
