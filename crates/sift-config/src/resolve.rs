//! Path resolution for the corpus definition.
//!
//! Resolves relative and tilde-prefixed corpus paths to absolute paths. Unlike directories
//! that must exist up front, the corpus file may be produced later by the article store, so
//! resolution never touches the filesystem; `Config::validate` reports a missing file.

use std::path::{Component, Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves a corpus path to an absolute path.
///
/// Handles three cases:
/// - Tilde paths (`~/articles.json`) - expanded to home directory
/// - Relative paths (`./data/articles.json`, `../shared.json`) - resolved relative to `config_dir`
/// - Absolute paths - returned as-is
///
/// `.` and `..` components are folded lexically.
pub fn resolve_corpus_path(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(path)?;

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        config_dir.join(&expanded)
    };

    Ok(fold_dots(&absolute))
}

/// Expands a tilde prefix to the home directory.
///
/// - `~` alone becomes the home directory
/// - `~/foo` becomes home directory joined with `foo`
/// - Paths not starting with `~` are returned unchanged
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        let home = home_dir()?;
        return Ok(home.join(rest));
    }

    Ok(PathBuf::from(path))
}

/// Returns the home directory.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Removes `.` components and applies `..` components without consulting the filesystem.
fn fold_dots(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
