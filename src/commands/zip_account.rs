//! `rotki-devtool zip-account --username <name> [--dev]`: archive one user.
//!
//! Writes `<backup_dir>/<app>_<username>_<YYYYMMDD_HHMMSS>[.dev].zip` with
//! entry names relative to the user's directory.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;

use super::backup::snapshot;
use crate::{
    config::Config,
    error::DevToolError,
    paths::{self, Environment},
    ui::Stages,
};

pub fn run(cfg: &Config, username: &str, env: Environment) -> Result<PathBuf> {
    let data_dir = paths::resolve(cfg, env)?;
    let user_data = paths::user_directory(&data_dir, username)?;

    if !user_data.is_dir() {
        tracing::error!("{} does not exist", user_data.display());
        return Err(DevToolError::MissingDirectory(user_data).into());
    }

    let mut stages = Stages::new("Zip account");
    let archive = snapshot(&mut stages, cfg, &user_data, username, env, Utc::now())?;
    stages.finish();

    println!("  {}", archive.display());
    Ok(archive)
}
