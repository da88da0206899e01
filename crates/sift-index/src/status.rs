//! Corpus status detection.
//!
//! Determines whether the configured corpus can be indexed, without building an index.

use std::{fs, io::ErrorKind, path::PathBuf};

use sift_config::Config;

use crate::{CorpusStore, FileStore};

/// Status of the configured corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusStatus {
    /// No corpus path is configured.
    NotConfigured,
    /// The configured corpus file does not exist.
    Missing {
        /// Configured corpus path.
        path: PathBuf,
    },
    /// The corpus file exists but cannot be read or parsed.
    Unreadable {
        /// Configured corpus path.
        path: PathBuf,
        /// Why the corpus could not be loaded.
        reason: String,
    },
    /// The corpus file parses.
    Ready {
        /// Configured corpus path.
        path: PathBuf,
        /// Number of records in the corpus.
        records: usize,
    },
}

impl CorpusStatus {
    /// Returns a human-readable description for display.
    pub fn description(&self) -> &'static str {
        match self {
            Self::NotConfigured => "not configured",
            Self::Missing { .. } => "missing",
            Self::Unreadable { .. } => "unreadable",
            Self::Ready { .. } => "ready",
        }
    }

    /// Returns true if the corpus can be indexed.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

/// Determines the status of the corpus named by `config`.
///
/// This loads and parses the corpus file once, so it costs as much as an index build's
/// read phase.
pub fn detect_corpus_status(config: &Config) -> CorpusStatus {
    let Some(path) = config.corpus.path.clone() else {
        return CorpusStatus::NotConfigured;
    };

    match fs::metadata(&path) {
        Err(error) if error.kind() == ErrorKind::NotFound => {
            return CorpusStatus::Missing { path };
        }
        Err(error) => {
            return CorpusStatus::Unreadable {
                reason: error.to_string(),
                path,
            };
        }
        Ok(_) => {}
    }

    match FileStore::new(&path).load() {
        Ok(records) => CorpusStatus::Ready {
            path,
            records: records.len(),
        },
        Err(error) => CorpusStatus::Unreadable {
            reason: error.to_string(),
            path,
        },
    }
}
