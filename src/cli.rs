//! Command-line interface definition.
//!
//! All argument parsing lives here so the rest of the codebase can stay
//! agnostic to `clap`.  The `Cli` struct is parsed once in `main` and then
//! passed (by reference) into the command handlers.

use std::path::PathBuf;

use clap::Parser;

/// Password given to accounts created by `new-user` unless one is supplied.
pub const DEFAULT_PASSWORD: &str = "1234";

/// Top-level CLI arguments, shared across every subcommand.
#[derive(Parser, Debug)]
#[command(
    name    = "rotki-devtool",
    about   = "Set of utilities to deal with rotki testing/development",
    version,
    help_template = "\
{before-help}{name} {version}
{about}

{usage-heading} {usage}

{all-args}{after-help}"
)]
pub struct Cli {
    /// Path to the configuration file.
    ///
    /// Defaults to `devtool.toml` in the current working directory.  A
    /// missing file is fine; every setting has a default.
    #[arg(short, long, default_value = "devtool.toml", global = true)]
    pub config: PathBuf,

    /// Log debug output (`RUST_LOG` overrides this).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print the resolved configuration and exit.
    #[arg(long)]
    pub print_config: bool,

    #[command(subcommand)]
    pub command: Option<Subcommand>,
}

#[derive(clap::Subcommand, Debug, PartialEq)]
pub enum Subcommand {
    /// Creates a backup of the user directory.
    ///
    /// Writes `backups/rotki_data_<timestamp>[.dev].zip`.
    Backup {
        /// Back up the development directory instead.
        #[arg(long)]
        dev: bool,
    },

    /// Replaces the data directory contents with that of a backup archive.
    ///
    /// The target directory is deleted without confirmation.
    Restore {
        /// The zip archive to restore from.
        #[arg(long, value_parser = existing_file)]
        file: PathBuf,

        /// Restore into the development directory instead.
        #[arg(long)]
        dev: bool,
    },

    /// Creates a new development user and seeds API keys from the environment.
    ///
    /// Reads ROTKI_API_KEY / ROTKI_API_SECRET (premium), CRYPTOCOMPARE_API_KEY,
    /// ETHERSCAN_API_KEY and OPTIMISM_ETHERSCAN_API_KEYS.  Unset variables are
    /// skipped.
    NewUser {
        /// The username of the new account.
        #[arg(long)]
        username: String,

        /// The password of the new account.
        #[arg(long, default_value = DEFAULT_PASSWORD)]
        password: String,
    },

    /// Copies the specified user from the production data to the development data.
    SyncUser {
        /// The username of the account to copy.
        #[arg(long)]
        username: String,

        /// Also copy the global data directory (global.db).
        #[arg(long)]
        include_global: bool,
    },

    /// Creates an archive of the data directory of the specified user.
    ///
    /// Writes `backups/rotki_<username>_<timestamp>[.dev].zip`.
    ZipAccount {
        /// The username of which an archive will be created.
        #[arg(long)]
        username: String,

        /// Archive the user from the development directory instead.
        #[arg(long)]
        dev: bool,
    },
}

/// `--file` must name an existing regular file.
fn existing_file(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_file() {
        Ok(path)
    } else if path.exists() {
        Err(format!("{value} is not a file"))
    } else {
        Err(format!("{value} does not exist"))
    }
}
