//! Configuration types and loading logic.
//!
//! Nothing here is required: with no config file at all the tool resolves
//! the rotki data root from the platform data directory and writes archives
//! to `./backups`, exactly like the python helper it replaces.
//!
//! # File format
//!
//! ```toml
//! [app]
//! name = "rotki"                      # prefix for archives and data dirs
//!
//! [paths]
//! data_root  = "/home/alice/.local/share/rotki"  # holds data/ and develop_data/
//! backup_dir = "backups"                          # relative to the cwd
//! ```
//!
//! Two files are read and merged field by field, local values winning:
//!
//! 1. `~/.config/rotki-devtool/config.toml`
//! 2. `--config` (default `./devtool.toml`)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ─── Top-level ────────────────────────────────────────────────────────────────

/// Fully resolved configuration handed to the commands.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,

    #[serde(default)]
    pub paths: PathsConfig,
}

// ─── [app] ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Application name.  Used for the default data root and as the archive
    /// file name prefix (`rotki_data_…zip`).
    #[serde(default = "default_app_name")]
    pub name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
        }
    }
}

// ─── [paths] ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PathsConfig {
    /// Directory containing `data/` and `develop_data/`.
    ///
    /// `None` means "ask the platform": see [`crate::paths::default_data_root`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_root: Option<PathBuf>,

    /// Where `backup` and `zip-account` write their archives.
    #[serde(default = "default_backup_dir")]
    pub backup_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_root: None,
            backup_dir: default_backup_dir(),
        }
    }
}

// ─── Defaults ─────────────────────────────────────────────────────────────────

pub fn default_app_name() -> String {
    "rotki".into()
}

pub fn default_backup_dir() -> PathBuf {
    PathBuf::from("backups")
}

// ─── Partial config (merge layer) ─────────────────────────────────────────────

/// Same shape as [`Config`] with every leaf optional, so a file can set a
/// single field without resetting the others.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct PartialConfig {
    #[serde(default)]
    pub app: PartialApp,

    #[serde(default)]
    pub paths: PartialPaths,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct PartialApp {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct PartialPaths {
    pub data_root: Option<PathBuf>,
    pub backup_dir: Option<PathBuf>,
}

impl PartialConfig {
    /// Overlay `other` on top of `self`; fields set in `other` win.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            app: PartialApp {
                name: other.app.name.or(self.app.name),
            },
            paths: PartialPaths {
                data_root: other.paths.data_root.or(self.paths.data_root),
                backup_dir: other.paths.backup_dir.or(self.paths.backup_dir),
            },
        }
    }

    /// Fill every unset field with its default.
    pub fn resolve(self) -> Config {
        Config {
            app: AppConfig {
                name: self.app.name.unwrap_or_else(default_app_name),
            },
            paths: PathsConfig {
                data_root: self.paths.data_root,
                backup_dir: self.paths.backup_dir.unwrap_or_else(default_backup_dir),
            },
        }
    }
}

// ─── Loader ───────────────────────────────────────────────────────────────────

/// Parse a partial config from `path`.
///
/// Returns `Ok(None)` when the file does not exist and an error when it
/// exists but is unreadable or not valid TOML.
pub fn parse_partial(path: &Path) -> Result<Option<PartialConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    let partial = toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(partial))
}

/// Location of the per-user config file, if the platform has one.
pub fn global_config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|d| d.join("rotki-devtool").join("config.toml"))
}

/// Load the global and local files and merge them.
///
/// A broken global file is ignored with a warning; a broken local file is an
/// error, since the user pointed at it explicitly (or dropped it in the cwd).
pub fn load_merged(global_path: Option<&Path>, local_path: &Path) -> Result<Config> {
    let global = match global_path.map(parse_partial) {
        Some(Ok(Some(p))) => p,
        Some(Err(e)) => {
            tracing::warn!("ignoring global config: {e:#}");
            PartialConfig::default()
        },
        _ => PartialConfig::default(),
    };

    let local = parse_partial(local_path)?.unwrap_or_else(|| {
        tracing::debug!("no config at {}, using defaults", local_path.display());
        PartialConfig::default()
    });

    Ok(global.merge(local).resolve())
}

// ─── Tests ────────────────────────────────────────────────────────────────────
