//! Text processing for sift.
//!
//! Everything that turns article and query text into searchable terms lives here:
//!
//! - [`strip_markup`]: linear-pass removal of HTML tags and character references
//! - [`Normalizer`]: lowercasing, character filtering, length and stop-word filtering,
//!   plus frequency-ranked keyword extraction
//! - [`Stopwords`]: English and Korean function words
//! - [`SynonymTable`]: symmetric synonym groups used for query expansion
//!
//! A term is a lowercase run of ASCII letters, digits and Hangul that is at least the
//! minimum length (two characters by default) and is not a stop-word.

#![warn(missing_docs)]

mod markup;
mod normalizer;
mod stopwords;
mod synonyms;

pub use markup::strip_markup;
pub use normalizer::{DEFAULT_MIN_TERM_LENGTH, Normalizer, is_term_char};
pub use stopwords::Stopwords;
pub use synonyms::SynonymTable;
