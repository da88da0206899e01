//! sift: article search from the command line.
//!
//! sift indexes a corpus of news articles kept in a JSON file and answers keyword
//! queries with ranked, filtered, paginated results. Queries tolerate typos and
//! synonyms in advanced mode, and `sift suggest` offers spelling corrections and related
//! terms. Configuration lives in `.sift.toml` files discovered from the working
//! directory upwards.

#![warn(missing_docs)]

pub mod cli;
