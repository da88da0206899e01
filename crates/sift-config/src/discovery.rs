//! Configuration file discovery.
//!
//! A search runs against whatever `.sift.toml` files sit between the working directory and
//! the filesystem root, with `~/.sift.toml` as a fallback. `SIFT_CONFIG` names one more
//! file that outranks all of them, so scripts and cron jobs can point at a corpus config
//! without changing directory.

use std::{
    env,
    path::{Path, PathBuf},
};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".sift.toml";

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "SIFT_CONFIG";

/// Discovers all configuration files relevant to the given directory.
///
/// Returns paths highest precedence first:
/// 1. The file named by `SIFT_CONFIG`, if set (relative paths resolve against `cwd`)
/// 2. Each `.sift.toml` from `cwd` upwards, stopping after one with `root = true`
/// 3. `~/.sift.toml`, unless a root config was reached
///
/// An explicit file is returned even when it does not exist, so loading reports it.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    discover_with_explicit(cwd, env_config_path().as_deref())
}

/// Discovers configuration files with `explicit` taking the place of `SIFT_CONFIG`.
pub fn discover_with_explicit(cwd: &Path, explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut configs: Vec<PathBuf> = explicit.map(|path| cwd.join(path)).into_iter().collect();
    let mut found_root = configs
        .first()
        .is_some_and(|path| path.is_file() && is_root_config(path));

    if !found_root {
        for dir in cwd.ancestors() {
            let candidate = dir.join(CONFIG_FILENAME);
            if !candidate.is_file() || configs.contains(&candidate) {
                continue;
            }
            found_root = is_root_config(&candidate);
            configs.push(candidate);
            if found_root {
                break;
            }
        }
    }

    if !found_root
        && let Some(global) = global_config_path()
        && global.is_file()
        && !configs.contains(&global)
    {
        configs.push(global);
    }

    configs
}

/// Returns the file named by `SIFT_CONFIG`, ignoring an empty value.
pub fn env_config_path() -> Option<PathBuf> {
    env::var_os(CONFIG_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Returns the path to the global configuration file (`~/.sift.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}
