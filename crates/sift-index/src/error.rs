//! Error types for the sift-index crate.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while reading a corpus from its store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to stat or read the corpus file.
    #[error("failed to read corpus {path}: {source}")]
    Read {
        /// Path to the corpus file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The corpus file is not valid JSON.
    #[error("failed to parse corpus {path}: {source}")]
    Parse {
        /// Path to the corpus file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The corpus JSON is neither an array nor an object with an `articles` array.
    #[error("corpus {path} must be a JSON array or an object with an \"articles\" array")]
    Shape {
        /// Path to the corpus file.
        path: PathBuf,
    },
}

/// Errors raised when a loosely typed query request fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The sort mode is not one of the supported modes.
    #[error("unknown sort mode '{value}' (expected newest, oldest, title or relevance)")]
    UnknownSort {
        /// Sort mode as requested.
        value: String,
    },

    /// The page number is below 1.
    #[error("page must be at least 1, got {value}")]
    InvalidPage {
        /// Page as requested.
        value: i64,
    },

    /// The page size is outside the accepted range.
    #[error("page size must be between {min} and {max}, got {value}")]
    PageSizeOutOfRange {
        /// Page size as requested.
        value: i64,
        /// Smallest accepted page size.
        min: usize,
        /// Largest accepted page size.
        max: usize,
    },

    /// A date bound could not be parsed.
    #[error("invalid {bound} date '{value}' (expected YYYY-MM-DD or RFC 3339)")]
    InvalidDate {
        /// Which bound failed: `from` or `to`.
        bound: &'static str,
        /// Date as requested.
        value: String,
    },
}
