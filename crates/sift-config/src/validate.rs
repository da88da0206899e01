//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use crate::{Config, MAX_PAGE_SIZE, MIN_PAGE_SIZE};

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    /// No corpus path is configured.
    NoCorpusDefined,
    /// The corpus path does not exist.
    CorpusMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// The corpus path exists but is not a regular file.
    CorpusNotFile {
        /// Path that is not a file.
        path: String,
    },
    /// The fuzzy threshold is outside `(0, 1]`.
    FuzzyThresholdOutOfRange {
        /// Configured threshold.
        value: f64,
    },
    /// The default page size is outside the accepted range.
    PageSizeOutOfRange {
        /// Configured page size.
        value: usize,
    },
    /// A synonym head term has no equivalents.
    EmptySynonymGroup {
        /// The head term.
        head: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCorpusDefined => write!(f, "no corpus path is defined in configuration"),
            Self::CorpusMissing { path } => write!(f, "corpus file does not exist: {path}"),
            Self::CorpusNotFile { path } => write!(f, "corpus path is not a file: {path}"),
            Self::FuzzyThresholdOutOfRange { value } => {
                write!(f, "fuzzy_threshold {value} is outside (0, 1]")
            }
            Self::PageSizeOutOfRange { value } => write!(
                f,
                "page_size {value} is outside [{MIN_PAGE_SIZE}, {MAX_PAGE_SIZE}]"
            ),
            Self::EmptySynonymGroup { head } => {
                write!(f, "synonym group '{head}' lists no equivalent terms")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    match &config.corpus.path {
        None => warnings.push(ConfigWarning::NoCorpusDefined),
        Some(path) if !path.exists() => warnings.push(ConfigWarning::CorpusMissing {
            path: path.display().to_string(),
        }),
        Some(path) if !path.is_file() => warnings.push(ConfigWarning::CorpusNotFile {
            path: path.display().to_string(),
        }),
        Some(_) => {}
    }

    let threshold = config.search.fuzzy_threshold;
    if !(threshold > 0.0 && threshold <= 1.0) {
        warnings.push(ConfigWarning::FuzzyThresholdOutOfRange { value: threshold });
    }

    let page_size = config.search.page_size;
    if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&page_size) {
        warnings.push(ConfigWarning::PageSizeOutOfRange { value: page_size });
    }

    for (head, terms) in &config.synonyms {
        if terms.iter().all(|t| t.trim().is_empty()) {
            warnings.push(ConfigWarning::EmptySynonymGroup { head: head.clone() });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use super::*;
    use crate::CorpusSettings;

    /// Builds a config pointing at `path`.
    fn with_corpus(path: &Path) -> Config {
        Config {
            corpus: CorpusSettings {
                path: Some(path.to_path_buf()),
            },
            ..Default::default()
        }
    }

    #[test]
    fn default_config_warns_about_corpus_only() {
        let warnings = validate_config(&Config::default());
        assert_eq!(warnings, vec![ConfigWarning::NoCorpusDefined]);
    }

    #[test]
    fn existing_corpus_file_is_clean() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = dir.path().join("articles.json");
        fs::write(&corpus, "[]").unwrap();

        assert!(validate_config(&with_corpus(&corpus)).is_empty());
    }

    #[test]
    fn missing_and_directory_corpus_paths() {
        let dir = tempfile::tempdir().unwrap();

        let missing = validate_config(&with_corpus(&dir.path().join("gone.json")));
        assert!(matches!(missing[0], ConfigWarning::CorpusMissing { .. }));

        let not_file = validate_config(&with_corpus(dir.path()));
        assert!(matches!(not_file[0], ConfigWarning::CorpusNotFile { .. }));
    }

    #[test]
    fn out_of_range_search_settings() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = dir.path().join("articles.json");
        fs::write(&corpus, "[]").unwrap();

        let mut config = with_corpus(&corpus);
        config.search.fuzzy_threshold = 1.5;
        config.search.page_size = 0;

        let warnings = validate_config(&config);
        assert!(warnings.contains(&ConfigWarning::FuzzyThresholdOutOfRange { value: 1.5 }));
        assert!(warnings.contains(&ConfigWarning::PageSizeOutOfRange { value: 0 }));
    }

    #[test]
    fn empty_synonym_group_is_flagged() {
        let mut config = Config::default();
        config
            .synonyms
            .insert("ai".to_string(), vec!["  ".to_string()]);

        let warnings = validate_config(&config);
        assert!(warnings.contains(&ConfigWarning::EmptySynonymGroup {
            head: "ai".to_string()
        }));
        assert_eq!(
            warnings.last().unwrap().to_string(),
            "synonym group 'ai' lists no equivalent terms"
        );
    }
}
