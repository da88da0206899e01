//! Configuration system for sift.
//!
//! sift uses TOML configuration files named `.sift.toml`. Configuration is resolved by walking
//! up the directory tree from the current working directory, collecting any `.sift.toml` files
//! found, then loading `~/.sift.toml` as the global config with lowest precedence. A file
//! named by the `SIFT_CONFIG` environment variable outranks every discovered file.
//!
//! A configuration names the article corpus to search and tunes the indexer and the query
//! engine. Synonym groups declared under `[synonyms]` extend the built-in synonym table.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

pub use discovery::{
    CONFIG_ENV, CONFIG_FILENAME, discover_config_files, discover_with_explicit, env_config_path,
    global_config_path, is_global_config,
};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawCorpusSettings, RawIndexSettings, RawSearchSettings, parse_config_file,
    parse_config_str,
};
pub use resolve::resolve_corpus_path;
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Smallest page size a query may request.
pub const MIN_PAGE_SIZE: usize = 1;

/// Largest page size a query may request.
pub const MAX_PAGE_SIZE: usize = 100;

/// Top-level merged configuration for sift.
///
/// This represents the fully resolved configuration after merging all discovered `.sift.toml`
/// files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Where the article corpus lives.
    pub corpus: CorpusSettings,
    /// Settings that shape the index build.
    pub index: IndexSettings,
    /// Query-time settings.
    pub search: SearchSettings,
    /// Extra synonym groups keyed by head term.
    pub synonyms: BTreeMap<String, Vec<String>>,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.sift.toml` files.
    ///
    /// This is the main entry point for loading configuration. It:
    /// 1. Takes the file named by `SIFT_CONFIG`, if set
    /// 2. Discovers all `.sift.toml` files from `cwd` up to the filesystem root
    /// 3. Appends `~/.sift.toml` if it exists
    /// 4. Parses each file
    /// 5. Merges them according to precedence rules (`SIFT_CONFIG`, then closest to `cwd`)
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    ///
    /// Returns `Ok(Config::default())` if the list is empty.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Validates the configuration and returns any warnings.
    ///
    /// This checks for:
    /// - A missing corpus definition, or a corpus path that does not exist
    /// - Fuzzy thresholds outside `(0, 1]`
    /// - Default page sizes outside the accepted range
    /// - Empty synonym groups
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output uses the same layout as a `.sift.toml` file. The corpus path is included
    /// in its resolved, absolute form.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            corpus: SerializableCorpus {
                path: self
                    .corpus
                    .path
                    .as_ref()
                    .map(|p| p.display().to_string()),
            },
            index: self.index.clone(),
            search: self.search.clone(),
            synonyms: self.synonyms.clone(),
        };
        toml::to_string_pretty(&serializable).unwrap_or_default()
    }
}

/// Location of the article corpus.
#[derive(Debug, Clone, Default)]
pub struct CorpusSettings {
    /// Resolved path to the corpus JSON file, if one is configured.
    pub path: Option<PathBuf>,
}

/// Settings that affect how articles are turned into index entries.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct IndexSettings {
    /// Number of keywords kept per article, most frequent first.
    pub keyword_limit: usize,
    /// Reading speed used to derive reading time.
    pub words_per_minute: usize,
    /// Terms shorter than this many characters are not indexed.
    pub min_term_length: usize,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            keyword_limit: 10,
            words_per_minute: 200,
            min_term_length: 2,
        }
    }
}

/// Query-time settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SearchSettings {
    /// Page size used when a query does not ask for one.
    pub page_size: usize,
    /// Minimum normalized edit-distance similarity for a fuzzy match.
    pub fuzzy_threshold: f64,
    /// Maximum fuzzy substitutions accepted per query term.
    pub max_fuzzy_matches: usize,
    /// Maximum vocabulary terms compared against one query term.
    pub fuzzy_sample_size: usize,
    /// Number of spelling suggestions offered per unknown query term.
    pub suggestion_limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            page_size: 10,
            fuzzy_threshold: 0.7,
            max_fuzzy_matches: 3,
            fuzzy_sample_size: 1000,
            suggestion_limit: 3,
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings {
    /// Corpus location.
    corpus: SerializableCorpus,
    /// Index build settings.
    index: IndexSettings,
    /// Query-time settings.
    search: SearchSettings,
    /// Synonym groups (sorted for deterministic output).
    synonyms: BTreeMap<String, Vec<String>>,
}

/// Corpus settings with the path rendered as a string.
#[derive(Serialize)]
struct SerializableCorpus {
    /// Resolved corpus path, omitted when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}
