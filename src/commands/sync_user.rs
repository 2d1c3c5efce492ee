//! `rotki-devtool sync-user --username <name> [--include-global]`: mirror a
//! production user into the development data directory.
//!
//! The production user directory must exist; if it does not, nothing is
//! touched and the command fails.  The user copy and the optional global
//! data copy are independent: a failure in the second leaves the first in
//! place.

use anyhow::{Context, Result};

use crate::{
    config::Config,
    copier::replace_dir,
    error::DevToolError,
    paths::{self, Environment, GLOBAL_DATA_DIR},
    ui::Stages,
};

pub fn run(cfg: &Config, username: &str, include_global: bool) -> Result<()> {
    let root = paths::data_root(cfg)?;
    let production = paths::data_directory(&root, Environment::Production);
    let development = paths::data_directory(&root, Environment::Development);

    let user_data = paths::user_directory(&production, username)?;
    let develop_data = paths::user_directory(&development, username)?;

    if !user_data.is_dir() {
        tracing::error!("{} does not exist", user_data.display());
        return Err(DevToolError::MissingDirectory(user_data).into());
    }

    let mut stages = Stages::new("Sync user");

    stages.run("User data", || {
        replace_dir(&user_data, &develop_data)
            .with_context(|| format!("copying {} to {}", user_data.display(), develop_data.display()))
    })?;

    if include_global {
        let global_data = production.join(GLOBAL_DATA_DIR);
        let develop_global = development.join(GLOBAL_DATA_DIR);
        stages.run("Global data", || {
            replace_dir(&global_data, &develop_global).with_context(|| {
                format!(
                    "copying {} to {}",
                    global_data.display(),
                    develop_global.display()
                )
            })
        })?;
    } else {
        stages.skip("Global data", "--include-global not set");
    }

    stages.finish();
    Ok(())
}
