//! Typed failures shared by the commands.
//!
//! Command handlers return `anyhow::Result` and attach path context; the
//! variants here exist so callers (and tests) can tell a missing source
//! directory apart from an I/O or archive failure.

use std::path::PathBuf;

use thiserror::Error;

use crate::data_handler::DataHandlerError;

#[derive(Error, Debug)]
pub enum DevToolError {
    #[error("{} does not exist", .0.display())]
    MissingDirectory(PathBuf),

    #[error("invalid username {0:?}")]
    InvalidUsername(String),

    #[error("could not determine the platform data directory")]
    NoDataDirectory,

    #[error("zip archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("directory copy failed: {0}")]
    Copy(#[from] fs_extra::error::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    DataHandler(#[from] DataHandlerError),
}

pub type Result<T> = std::result::Result<T, DevToolError>;
