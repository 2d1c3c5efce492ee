//! `rotki-devtool`: backup, restore and account helpers for rotki
//! development.
//!
//! # Overview
//!
//! rotki keeps its state in a production data directory (`data/`) and a
//! development one (`develop_data/`) under the same root.  This tool moves
//! that state around while working on rotki: snapshot it, put a snapshot
//! back, copy a real account into the development tree, or create a fresh
//! development account with API keys taken from `.env`.
//!
//! # Usage
//!
//! ```text
//! rotki-devtool backup [--dev]
//! rotki-devtool restore --file backups/rotki_data_20240102_030405.zip [--dev]
//! rotki-devtool new-user --username alice [--password 1234]
//! rotki-devtool sync-user --username alice [--include-global]
//! rotki-devtool zip-account --username alice [--dev]
//! rotki-devtool --print-config
//! ```
//!
//! # Module layout
//!
//! | Module                   | Responsibility                                  |
//! |--------------------------|-------------------------------------------------|
//! | [`cli`]                  | Argument types parsed by clap                   |
//! | [`config`]               | `Config` struct + TOML loader and merge         |
//! | [`paths`]                | Production / development directory resolution   |
//! | [`archive`]              | Zip writing and extraction                      |
//! | [`copier`]               | Delete-then-copy of directory trees             |
//! | [`credentials`]          | API keys read from the environment              |
//! | [`data_handler`]         | Account storage trait, session guard, local impl|
//! | [`ui`]                   | Spinner, stage lines, summary                   |
//! | [`logging`]              | `tracing` subscriber setup                      |
//! | [`commands`]             | One handler per subcommand                      |

mod archive;
mod cli;
mod commands;
mod config;
mod copier;
mod credentials;
mod data_handler;
mod error;
mod logging;
mod paths;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::{Cli, Subcommand};
use paths::Environment;

fn main() -> Result<()> {
    // A missing .env is normal; only the variables in it are optional.
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init(cli.verbose);

    match dotenv {
        Ok(path) => tracing::debug!("loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {},
        Err(e) => tracing::warn!("ignoring .env: {e}"),
    }

    let cfg = config::load_merged(config::global_config_path().as_deref(), &cli.config)?;

    if cli.print_config {
        println!("{cfg:#?}");
        if cli.command.is_none() {
            return Ok(());
        }
    }

    let Some(command) = &cli.command else {
        Cli::command().print_help()?;
        anyhow::bail!("no subcommand given");
    };

    match command {
        Subcommand::Backup { dev } => {
            commands::backup::run(&cfg, Environment::from_dev_flag(*dev))?;
        },
        Subcommand::Restore { file, dev } => {
            commands::restore::run(&cfg, file, Environment::from_dev_flag(*dev))?;
        },
        Subcommand::NewUser { username, password } => {
            commands::new_user::run(&cfg, username, password)?;
        },
        Subcommand::SyncUser {
            username,
            include_global,
        } => {
            commands::sync_user::run(&cfg, username, *include_global)?;
        },
        Subcommand::ZipAccount { username, dev } => {
            commands::zip_account::run(&cfg, username, Environment::from_dev_flag(*dev))?;
        },
    }

    Ok(())
}
