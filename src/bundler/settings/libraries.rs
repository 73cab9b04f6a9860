//! `library.lib` reader.
//!
//! One prebuilt archive per line. Blank lines and lines starting with `#`
//! are skipped. Relative entries resolve against the current working
//! directory, like any other path handed to the bundler on the command line.
//! Order is significant: it is the order archives appear on the compile
//! classpath and on the `d8` command line.

use crate::bundler::error::{Error, ErrorExt, Result};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// File name of the library manifest inside the project directory.
pub const LIBRARY_MANIFEST_FILE: &str = "library.lib";

/// Ordered list of absolute paths to prebuilt library archives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryManifest {
    archives: Vec<PathBuf>,
}

impl LibraryManifest {
    /// Read the manifest at `path`.
    ///
    /// A missing file yields an empty manifest. Every listed entry must be an
    /// existing file, otherwise [`Error::MissingLibrary`] names the line.
    pub fn read(path: &Path) -> Result<Self> {
        if !path.is_file() {
            log::debug!("No {} found, building without libraries", LIBRARY_MANIFEST_FILE);
            return Ok(Self::default());
        }

        log::info!("Reading {}", path.display());
        let content = std::fs::read_to_string(path).fs_context("reading library manifest", path)?;
        Self::parse(&content)
    }

    /// Parse manifest text, resolving relative entries against the current
    /// working directory.
    pub fn parse(content: &str) -> Result<Self> {
        let mut archives = Vec::new();

        for raw in content.lines() {
            let line = raw.trim_start_matches('\u{feff}').trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let resolved = Path::new(line)
                .absolutize()
                .fs_context("resolving library path", line)?
                .into_owned();

            if !resolved.is_file() {
                return Err(Error::MissingLibrary {
                    line: line.to_string(),
                    path: resolved,
                });
            }

            log::info!("Added library: {}", resolved.display());
            archives.push(resolved);
        }

        Ok(Self { archives })
    }

    /// Archives in manifest order.
    pub fn archives(&self) -> &[PathBuf] {
        &self.archives
    }

    pub fn is_empty(&self) -> bool {
        self.archives.is_empty()
    }

    pub fn len(&self) -> usize {
        self.archives.len()
    }
}
