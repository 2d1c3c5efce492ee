//! `rotki-devtool restore --file <zip> [--dev]`: replace a data directory
//! with the contents of an archive.
//!
//! The archive is opened first, so an unreadable or corrupt file aborts
//! before anything is deleted.  After that the target directory is removed
//! without confirmation; if extraction then fails the directory is left
//! partial.

use std::{fs, path::Path};

use anyhow::{Context, Result};

use crate::{
    archive::{extract_archive, open_archive},
    config::Config,
    paths::{self, Environment},
    ui::Stages,
};

pub fn run(cfg: &Config, file: &Path, env: Environment) -> Result<()> {
    let data_dir = paths::resolve(cfg, env)?;
    let mut stages = Stages::new("Restore");

    let mut archive = stages.run("Open archive", || {
        open_archive(file).with_context(|| format!("opening {}", file.display()))
    })?;

    if data_dir.exists() {
        tracing::info!("deleting {}", data_dir.display());
        stages.run("Delete", || {
            fs::remove_dir_all(&data_dir)
                .with_context(|| format!("deleting {}", data_dir.display()))
        })?;
    } else {
        stages.skip("Delete", "target does not exist");
    }

    tracing::info!("preparing to extract to {}", data_dir.display());
    stages.run("Extract", || {
        extract_archive(&mut archive, &data_dir)
            .with_context(|| format!("extracting {} to {}", file.display(), data_dir.display()))
    })?;

    stages.finish();
    Ok(())
}
