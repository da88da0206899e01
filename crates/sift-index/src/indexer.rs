//! Index construction.
//!
//! The [`Indexer`] turns a corpus snapshot into a [`SearchIndex`]:
//! 1. Extract each record's fields, skipping records that cannot be used
//! 2. Strip markup from the body and derive keywords, word count and reading time
//! 3. Register the article under every term of its title, body and keywords
//! 4. Collect authors, sources and the publish-date span
//!
//! A build never fails. Bad records are counted in [`BuildStats`] and logged.

use std::{
    collections::{HashMap, HashSet, hash_map::Entry},
    time::Instant,
};

use serde_json::Value;
use sift_config::IndexSettings;
use sift_text::{Normalizer, strip_markup};
use tracing::{debug, info, warn};

use crate::{
    Article, BuildStats, InvertedIndex, RawArticle, RecordDefect, SearchIndex,
    article::parse_publish_date, metadata::MetadataBuilder,
};

/// Builds search indexes from corpus records.
#[derive(Debug, Clone)]
pub struct Indexer {
    /// Normalizer for article text.
    normalizer: Normalizer,
    /// Keywords kept per article.
    keyword_limit: usize,
    /// Reading speed for reading-time estimates.
    words_per_minute: usize,
}

impl Default for Indexer {
    fn default() -> Self {
        Self::new(&IndexSettings::default())
    }
}

impl Indexer {
    /// Creates an indexer from index settings.
    pub fn new(settings: &IndexSettings) -> Self {
        Self {
            normalizer: Normalizer::new(settings.min_term_length),
            keyword_limit: settings.keyword_limit,
            words_per_minute: settings.words_per_minute.max(1),
        }
    }

    /// Returns the normalizer used for article text.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Builds an index from corpus records.
    pub fn build(&self, records: &[Value]) -> SearchIndex {
        let started = Instant::now();
        let mut stats = BuildStats {
            records_seen: records.len(),
            ..Default::default()
        };
        let mut articles: HashMap<String, Article> = HashMap::with_capacity(records.len());
        let mut postings: HashMap<String, HashSet<String>> = HashMap::new();
        let mut metadata = MetadataBuilder::default();

        for (position, record) in records.iter().enumerate() {
            let raw = match RawArticle::from_value(record) {
                Ok(raw) => raw,
                Err(defect) => {
                    match defect {
                        RecordDefect::MissingId => stats.missing_ids += 1,
                        RecordDefect::NotAnObject | RecordDefect::BodyNotString => {
                            stats.records_skipped += 1;
                        }
                    }
                    warn!(position, reason = defect.description(), "skipping corpus record");
                    continue;
                }
            };

            let Entry::Vacant(slot) = articles.entry(raw.id.clone()) else {
                stats.duplicate_ids += 1;
                warn!(position, id = %raw.id, "skipping duplicate article id");
                continue;
            };

            let article = self.enhance(raw, &mut stats);
            for term in self.article_terms(&article) {
                postings.entry(term).or_default().insert(article.id.clone());
            }
            metadata.observe(&article.author, &article.source, article.published_at);
            slot.insert(article);
        }

        let terms = InvertedIndex::new(postings);
        stats.articles_indexed = articles.len();
        stats.terms = terms.len();

        info!(
            articles = stats.articles_indexed,
            terms = stats.terms,
            dropped = stats.records_dropped(),
            elapsed_ms = started.elapsed().as_millis(),
            "built search index"
        );

        SearchIndex::new(
            articles,
            terms,
            metadata.finish(),
            stats,
            self.normalizer.clone(),
        )
    }

    /// Derives the search-enhanced article from a raw one.
    fn enhance(&self, raw: RawArticle, stats: &mut BuildStats) -> Article {
        let searchable_content = strip_markup(&raw.body);
        let word_count = searchable_content.split_whitespace().count();
        let keywords = self
            .normalizer
            .extract_keywords(&searchable_content, self.keyword_limit);

        let published_at = raw.publish_date.as_deref().and_then(|date| {
            let parsed = parse_publish_date(date);
            if parsed.is_none() {
                stats.unparsed_dates += 1;
                debug!(id = %raw.id, date, "unparseable publish date");
            }
            parsed
        });

        Article {
            id: raw.id,
            title: raw.title,
            searchable_content,
            author: raw.author,
            source: raw.source,
            published_at,
            keywords,
            word_count,
            reading_time: word_count.div_ceil(self.words_per_minute),
        }
    }

    /// Returns the distinct terms of an article's title, content and keywords.
    fn article_terms(&self, article: &Article) -> HashSet<String> {
        let mut terms: HashSet<String> = self
            .normalizer
            .normalize(&article.title)
            .into_iter()
            .collect();
        terms.extend(self.normalizer.normalize_plain(&article.searchable_content));
        for keyword in &article.keywords {
            terms.extend(self.normalizer.normalize_plain(keyword));
        }
        terms
    }
}
