//! File system utilities for bundling.
//!
//! Idempotent directory creation/removal and deterministic file discovery.

use crate::bundler::error::{ErrorExt, Result};
use std::{
    ffi::OsStr,
    io,
    path::{Path, PathBuf},
};
use tokio::fs;

/// Creates all of the directories of the specified path, erasing it first if specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }

    // create_dir_all is already idempotent - succeeds even if dir exists
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Recursively collects regular files under `dir` with the given extension.
///
/// Symlinks are followed, so a linked file counts as the file it points to.
/// Paths are returned sorted so tool command lines are stable across runs.
/// A missing `dir` yields an empty list.
pub fn collect_files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && entry.path().extension() == Some(OsStr::new(extension))
        {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Lists regular files directly inside `dir` with the given extension,
/// sorted lexicographically by file name.
pub async fn list_files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)
        .await
        .fs_context("reading directory", dir)?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .fs_context("reading directory", dir)?
    {
        let path = entry.path();
        let is_file = entry
            .file_type()
            .await
            .fs_context("reading file type", &path)?
            .is_file();
        if is_file && path.extension() == Some(OsStr::new(extension)) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
