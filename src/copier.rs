//! Delete-then-copy of a directory tree.

use std::{fs, path::Path};

use fs_extra::dir::CopyOptions;

use crate::error::{DevToolError, Result};

/// Replace `destination` with a recursive copy of `source`.
///
/// `source` must be an existing directory; it is checked before anything is
/// deleted.  An existing `destination` is removed first, so files that only
/// existed there do not survive.  There is no rollback: if the copy fails
/// after the delete, `destination` is left partial.
///
/// Returns the number of bytes copied.
pub fn replace_dir(source: &Path, destination: &Path) -> Result<u64> {
    if !source.is_dir() {
        return Err(DevToolError::MissingDirectory(source.to_path_buf()));
    }

    if destination.exists() {
        tracing::info!("deleting {}", destination.display());
        fs::remove_dir_all(destination)?;
    }

    fs::create_dir_all(destination)?;

    tracing::info!("copying {} to {}", source.display(), destination.display());
    let mut options = CopyOptions::new();
    options.content_only = true;
    options.copy_inside = true;
    Ok(fs_extra::dir::copy(source, destination, &options)?)
}
