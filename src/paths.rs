//! Data directory resolution.
//!
//! rotki keeps production state under `<root>/data` and development state
//! under `<root>/develop_data`.  Which one a command touches is an explicit
//! [`Environment`] argument; nothing here reads or mutates process state
//! beyond asking `dirs` for the platform data directory.

use std::path::{Path, PathBuf};

use crate::{
    config::Config,
    error::{DevToolError, Result},
};

/// Name of the directory shared by every account (holds `global.db`).
pub const GLOBAL_DATA_DIR: &str = "global_data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
}

impl Environment {
    /// Maps the CLI `--dev` flag.
    pub const fn from_dev_flag(dev: bool) -> Self {
        if dev {
            Self::Development
        } else {
            Self::Production
        }
    }

    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Production => "data",
            Self::Development => "develop_data",
        }
    }

    pub const fn is_dev(self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Platform default for the application root.
///
/// Follows the appdirs convention rotki uses: `<data_local>/<app>` on Linux
/// and macOS, `<data_local>\<app>\<app>` on Windows.
pub fn default_data_root(app: &str) -> Result<PathBuf> {
    let base = dirs::data_local_dir().ok_or(DevToolError::NoDataDirectory)?;
    let root = base.join(app);
    if cfg!(windows) {
        Ok(root.join(app))
    } else {
        Ok(root)
    }
}

/// The configured root, or the platform default when none is set.
pub fn data_root(cfg: &Config) -> Result<PathBuf> {
    match &cfg.paths.data_root {
        Some(root) => Ok(root.clone()),
        None => default_data_root(&cfg.app.name),
    }
}

pub fn data_directory(root: &Path, env: Environment) -> PathBuf {
    root.join(env.dir_name())
}

/// Usernames become directory names, so they must be one plain path
/// component and must not collide with the shared global data directory.
pub fn is_valid_username(username: &str) -> bool {
    !(username.is_empty()
        || username == "."
        || username == ".."
        || username == GLOBAL_DATA_DIR
        || username.contains(['/', '\\']))
}

/// `<data_dir>/<username>`, rejecting names that would escape `data_dir`.
pub fn user_directory(data_dir: &Path, username: &str) -> Result<PathBuf> {
    if is_valid_username(username) {
        Ok(data_dir.join(username))
    } else {
        Err(DevToolError::InvalidUsername(username.to_string()))
    }
}

/// Shorthand for `data_directory(data_root(cfg)?, env)`.
pub fn resolve(cfg: &Config, env: Environment) -> Result<PathBuf> {
    Ok(data_directory(&data_root(cfg)?, env))
}
