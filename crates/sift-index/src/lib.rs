//! In-memory article search for sift.
//!
//! This crate turns a corpus of article records into a searchable index and answers
//! queries against it. It handles:
//! - Article extraction from raw JSON records, with markup stripping, keywords, word count
//!   and reading time
//! - Inverted index and corpus metadata construction
//! - Corpus stores and an index cache that rebuilds when the corpus changes
//! - Query validation, candidate selection, filtering, scoring, sorting and pagination
//! - Synonym expansion, fuzzy matching and spelling suggestions
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use sift_config::Config;
//! use sift_index::{MemoryStore, Query, SearchEngine};
//!
//! let store = MemoryStore::new(vec![json!({
//!     "id": "a1",
//!     "title": "AI 기술 혁신",
//!     "body": "<p>인공지능 기술이 산업을 바꾼다</p>",
//!     "publishDate": "2025-03-01",
//! })]);
//! let engine = SearchEngine::new(store, &Config::default());
//!
//! let response = engine.search(&Query::new("AI"));
//! assert_eq!(response.page.total_count, 1);
//! assert_eq!(response.resolve()[0].article.id, "a1");
//! ```

#![warn(missing_docs)]

mod advanced;
mod article;
mod cache;
mod engine;
mod error;
mod fuzzy;
mod index;
mod indexer;
mod inverted;
mod metadata;
mod query;
mod search;
mod status;
mod store;
mod suggest;

pub use advanced::{
    AdvancedResult, Expansion, ExpandedTerm, FUZZY_WEIGHT, FuzzyMatch, FuzzyReport,
    QueryExpander, SYNONYM_WEIGHT, TermKind, advanced_search,
};
pub use article::{Article, RawArticle, RecordDefect, parse_publish_date};
pub use cache::IndexCache;
pub use engine::{ResolvedHit, SearchEngine, SearchResponse};
pub use error::{QueryError, StoreError};
pub use index::{BuildStats, SearchIndex};
pub use indexer::Indexer;
pub use inverted::InvertedIndex;
pub use metadata::{DateSpan, Metadata};
pub use query::{DEFAULT_PAGE_SIZE, DateFilter, Filters, Query, QueryRequest, SortMode};
pub use search::{SearchHit, SearchPage, search};
pub use status::{CorpusStatus, detect_corpus_status};
pub use store::{CorpusSignature, CorpusStore, FileStore, MemoryStore};
pub use suggest::{Correction, Suggester, Suggestions};
