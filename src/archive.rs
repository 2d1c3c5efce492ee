//! Zip snapshots of a directory tree.
//!
//! Entry names are the paths relative to the archived root, joined with
//! `/`.  Directories get their own entries so empty ones survive a round
//! trip.  The tree is listed up front and written in sorted order, so two
//! archives of the same tree list their entries identically.

use std::{
    fs::File,
    io::{self, Read, Seek},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use zip::{ZipArchive, ZipWriter, write::SimpleFileOptions};

use crate::{
    error::{DevToolError, Result},
    paths::Environment,
    ui::StageDetail,
};

/// What ended up inside a freshly written archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArchiveSummary {
    pub files: usize,
    pub directories: usize,
}

impl StageDetail for ArchiveSummary {
    fn detail(&self) -> Option<String> {
        Some(format!("{} files, {} directories", self.files, self.directories))
    }
}

impl<R: Read + Seek> StageDetail for ZipArchive<R> {
    fn detail(&self) -> Option<String> {
        Some(format!("{} entries", self.len()))
    }
}

// ─── Naming ───────────────────────────────────────────────────────────────────

/// UTC timestamp used in archive names, e.g. `20240102_030405`.
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y%m%d_%H%M%S").to_string()
}

/// `<app>_<label>_<timestamp>[.dev].zip`
///
/// `backup` passes `"data"` as the label, `zip-account` the username.
pub fn archive_name(app: &str, label: &str, timestamp: &str, env: Environment) -> String {
    let postfix = if env.is_dev() { ".dev" } else { "" };
    format!("{app}_{label}_{timestamp}{postfix}.zip")
}

// ─── Writing ──────────────────────────────────────────────────────────────────

/// Entry name for `path` relative to `root`, always `/`-separated.
fn entry_name(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Entries at or above this size need the Zip64 extension.
const ZIP64_THRESHOLD: u64 = u32::MAX as u64;

fn needs_zip64(len: u64) -> bool {
    len >= ZIP64_THRESHOLD
}

/// Options for an entry of `len` bytes, carrying `mode` when known.
fn entry_options(mode: Option<u32>, len: u64) -> SimpleFileOptions {
    let options = SimpleFileOptions::default().large_file(needs_zip64(len));
    match mode {
        Some(mode) => options.unix_permissions(mode),
        None => options,
    }
}

#[cfg(unix)]
fn file_options(path: &Path) -> io::Result<SimpleFileOptions> {
    use std::os::unix::fs::PermissionsExt;
    let metadata = std::fs::metadata(path)?;
    Ok(entry_options(
        Some(metadata.permissions().mode()),
        metadata.len(),
    ))
}

#[cfg(not(unix))]
fn file_options(path: &Path) -> io::Result<SimpleFileOptions> {
    Ok(entry_options(None, std::fs::metadata(path)?.len()))
}

/// Write every file and directory under `source` into a new zip at
/// `destination`.  An existing file at `destination` is truncated.
pub fn write_archive(source: &Path, destination: &Path) -> Result<ArchiveSummary> {
    if !source.is_dir() {
        return Err(DevToolError::MissingDirectory(source.to_path_buf()));
    }

    let content = fs_extra::dir::get_dir_content(source)?;

    let mut directories: Vec<PathBuf> = content.directories.iter().map(PathBuf::from).collect();
    let mut files: Vec<PathBuf> = content.files.iter().map(PathBuf::from).collect();
    directories.sort();
    files.sort();

    let mut zip = ZipWriter::new(File::create(destination)?);
    let mut summary = ArchiveSummary::default();

    for dir in &directories {
        // get_dir_content lists the root itself; it has no entry name.
        let Some(name) = entry_name(source, dir) else {
            continue;
        };
        tracing::trace!("adding directory {name}");
        zip.add_directory(name, file_options(dir)?)?;
        summary.directories += 1;
    }

    for path in &files {
        let Some(name) = entry_name(source, path) else {
            continue;
        };
        tracing::trace!("adding file {name}");
        zip.start_file(name, file_options(path)?)?;
        let mut input = File::open(path)?;
        io::copy(&mut input, &mut zip)?;
        summary.files += 1;
    }

    zip.finish()?;
    Ok(summary)
}

// ─── Reading ──────────────────────────────────────────────────────────────────

/// Open `path` and parse its central directory.
///
/// Kept separate from [`extract_archive`] so `restore` can reject a corrupt
/// archive before deleting anything.
pub fn open_archive(path: &Path) -> Result<ZipArchive<File>> {
    let file = File::open(path)?;
    Ok(ZipArchive::new(file)?)
}

/// Extract every entry of `archive` below `target`, creating it if needed.
///
/// Entries whose names would escape `target` make the extraction fail.
pub fn extract_archive(archive: &mut ZipArchive<File>, target: &Path) -> Result<usize> {
    std::fs::create_dir_all(target)?;
    archive.extract(target)?;
    Ok(archive.len())
}

/// Entry names of an archive in stored order.
#[cfg(test)]
pub fn entry_names(archive: &ZipArchive<File>) -> Vec<String> {
    archive.file_names().map(str::to_owned).collect()
}

// ─── Tests ────────────────────────────────────────────────────────────────────
