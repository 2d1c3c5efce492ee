//! `rotki-devtool backup [--dev]`: zip the whole data directory.
//!
//! Writes `<backup_dir>/<app>_data_<YYYYMMDD_HHMMSS>[.dev].zip`.  The
//! snapshot helper here is shared with `zip-account`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::{
    archive::{archive_name, timestamp, write_archive},
    config::Config,
    paths::{self, Environment},
    ui::Stages,
};

pub fn run(cfg: &Config, env: Environment) -> Result<PathBuf> {
    let data_dir = paths::resolve(cfg, env)?;

    let mut stages = Stages::new("Backup");
    let archive = snapshot(&mut stages, cfg, &data_dir, "data", env, Utc::now())?;
    stages.finish();

    println!("  {}", archive.display());
    Ok(archive)
}

/// Archive `source` into the backup directory under a timestamped name.
pub(crate) fn snapshot(
    stages: &mut Stages,
    cfg: &Config,
    source: &Path,
    label: &str,
    env: Environment,
    now: DateTime<Utc>,
) -> Result<PathBuf> {
    let backup_dir = &cfg.paths.backup_dir;
    stages.run("Backup directory", || {
        fs::create_dir_all(backup_dir).with_context(|| format!("creating {}", backup_dir.display()))
    })?;

    let file = backup_dir.join(archive_name(&cfg.app.name, label, &timestamp(now), env));
    tracing::info!(
        "Preparing to save {} to archive {}",
        source.display(),
        file.display()
    );

    stages.run("Archive", || {
        write_archive(source, &file)
            .with_context(|| format!("archiving {} into {}", source.display(), file.display()))
    })?;

    Ok(file)
}
