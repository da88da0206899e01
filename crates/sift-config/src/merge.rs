//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules and resolving the corpus path.

use std::{collections::BTreeMap, path::PathBuf};

use crate::{
    Config, ConfigError, CorpusSettings, IndexSettings, SearchSettings,
    parse::{RawConfig, RawIndexSettings, RawSearchSettings},
    resolve::resolve_corpus_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config).
///
/// Merge rules:
/// - Scalar settings: first defined value wins (highest precedence)
/// - Corpus path: first definition wins, resolved relative to the file that defines it
/// - Synonyms: merged by head term, first definition for each head term wins
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    let Some(first) = configs.first() else {
        return Ok(Config::default());
    };

    let config_root = first
        .path
        .parent()
        .ok_or_else(|| ConfigError::NoParentDirectory {
            path: first.path.clone(),
        })?
        .to_path_buf();

    Ok(Config {
        corpus: merge_corpus(configs)?,
        index: merge_index_settings(configs),
        search: merge_search_settings(configs),
        synonyms: merge_synonyms(configs),
        config_root: Some(config_root),
    })
}

/// Finds the highest-precedence corpus path and resolves it.
fn merge_corpus(configs: &[ParsedConfig]) -> Result<CorpusSettings, ConfigError> {
    for parsed in configs {
        let Some(path) = parsed
            .config
            .corpus
            .as_ref()
            .and_then(|corpus| corpus.path.as_deref())
        else {
            continue;
        };

        let config_dir = parsed
            .path
            .parent()
            .ok_or_else(|| ConfigError::NoParentDirectory {
                path: parsed.path.clone(),
            })?;

        return Ok(CorpusSettings {
            path: Some(resolve_corpus_path(path, config_dir)?),
        });
    }

    Ok(CorpusSettings::default())
}

/// Merges index settings, taking first defined value for each field.
fn merge_index_settings(configs: &[ParsedConfig]) -> IndexSettings {
    let mut result = IndexSettings::default();

    // Iterate in reverse (lowest precedence first) so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref index) = parsed.config.index {
            apply_raw_index(&mut result, index);
        }
    }

    result
}

/// Applies raw index settings to result, overwriting any present values.
fn apply_raw_index(result: &mut IndexSettings, raw: &RawIndexSettings) {
    if let Some(v) = raw.keyword_limit {
        result.keyword_limit = v;
    }
    if let Some(v) = raw.words_per_minute {
        result.words_per_minute = v;
    }
    if let Some(v) = raw.min_term_length {
        result.min_term_length = v;
    }
}

/// Merges search settings.
fn merge_search_settings(configs: &[ParsedConfig]) -> SearchSettings {
    let mut result = SearchSettings::default();

    for parsed in configs.iter().rev() {
        if let Some(ref search) = parsed.config.search {
            apply_raw_search(&mut result, search);
        }
    }

    result
}

/// Applies raw search settings to result.
fn apply_raw_search(result: &mut SearchSettings, raw: &RawSearchSettings) {
    if let Some(v) = raw.page_size {
        result.page_size = v;
    }
    if let Some(v) = raw.fuzzy_threshold {
        result.fuzzy_threshold = v;
    }
    if let Some(v) = raw.max_fuzzy_matches {
        result.max_fuzzy_matches = v;
    }
    if let Some(v) = raw.fuzzy_sample_size {
        result.fuzzy_sample_size = v;
    }
    if let Some(v) = raw.suggestion_limit {
        result.suggestion_limit = v;
    }
}

/// Merges synonym groups by head term.
fn merge_synonyms(configs: &[ParsedConfig]) -> BTreeMap<String, Vec<String>> {
    let mut result = BTreeMap::new();

    // Forward order: the first (highest precedence) definition of a head term wins
    for parsed in configs {
        let Some(ref synonyms) = parsed.config.synonyms else {
            continue;
        };
        for (head, terms) in synonyms {
            result
                .entry(head.clone())
                .or_insert_with(|| terms.clone());
        }
    }

    result
}
