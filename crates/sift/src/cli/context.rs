//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use sift_config::Config;
use sift_index::{FileStore, SearchEngine};

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    ///
    /// A `corpus_override` replaces the configured corpus path; a relative override is
    /// resolved against the current directory.
    pub fn load(corpus_override: Option<&Path>) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let mut config = load_config_or_failure(&cwd)?;
        if let Some(path) = corpus_override {
            config.corpus.path = Some(cwd.join(path));
        }
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for `init`, which should work even when an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Returns the corpus path, or fails with a hint if none is configured.
    pub fn require_corpus(&self) -> Result<&Path, ExitCode> {
        self.config.corpus.path.as_deref().ok_or_else(|| {
            eprintln!("error: no corpus configured");
            eprintln!(
                "Run 'sift init' and set [corpus] path, or pass --corpus <PATH>."
            );
            ExitCode::FAILURE
        })
    }

    /// Builds a search engine over the configured corpus file and indexes it.
    ///
    /// Fails if the corpus cannot be loaded, rather than answering from an empty index.
    pub fn engine(&self) -> Result<SearchEngine<FileStore>, ExitCode> {
        let path = self.require_corpus()?;
        let engine = SearchEngine::new(FileStore::new(path), &self.config);

        engine.index();
        if engine.generation() == 0 {
            eprintln!("error: could not load corpus {}", path.display());
            return Err(ExitCode::FAILURE);
        }
        Ok(engine)
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
