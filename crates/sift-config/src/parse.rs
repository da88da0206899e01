//! Configuration file parsing.
//!
//! Parses individual `.sift.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
/// This mirrors the TOML schema exactly.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Corpus section.
    pub corpus: Option<RawCorpusSettings>,
    /// Index build section.
    pub index: Option<RawIndexSettings>,
    /// Search section.
    pub search: Option<RawSearchSettings>,
    /// Synonym groups: head term -> one or more equivalent terms.
    #[serde_as(as = "Option<HashMap<_, OneOrMany<_>>>")]
    pub synonyms: Option<HashMap<String, Vec<String>>>,
}

/// Raw corpus settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCorpusSettings {
    /// Path to the corpus JSON file, relative to the config file.
    pub path: Option<String>,
}

/// Raw index build settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawIndexSettings {
    /// Keywords kept per article.
    pub keyword_limit: Option<usize>,
    /// Reading speed for reading-time estimates.
    pub words_per_minute: Option<usize>,
    /// Minimum indexed term length in characters.
    pub min_term_length: Option<usize>,
}

/// Raw search settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSearchSettings {
    /// Default page size.
    #[serde(alias = "default_page_size")]
    pub page_size: Option<usize>,
    /// Similarity threshold for fuzzy matches (0.0-1.0).
    pub fuzzy_threshold: Option<f64>,
    /// Maximum fuzzy substitutions per query term.
    pub max_fuzzy_matches: Option<usize>,
    /// Vocabulary sample bound for fuzzy comparison.
    pub fuzzy_sample_size: Option<usize>,
    /// Spelling suggestions per unknown term.
    pub suggestion_limit: Option<usize>,
}

/// Parses a configuration file from disk.
///
/// Returns a `RawConfig` with all fields as optionals, ready for merging.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
///
/// Useful for validating template content (tests only).
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// This is used during discovery to stop traversal at root configs.
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
