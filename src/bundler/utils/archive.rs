//! Zip archive helpers.
//!
//! APKs and jars are zip files. Two stages append to `base.apk` in place
//! (dex merge, asset injection) through [`PackageUpdate`]; the archiver
//! writes `classes.jar` from scratch with [`create_class_archive`].
//!
//! Everything here is blocking `std::fs`/`zip` IO; async callers wrap it in
//! `tokio::task::spawn_blocking`.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{
    fs::{File, OpenOptions},
    io::{self, Write},
    path::{Component, Path, PathBuf},
};
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter, write::SimpleFileOptions};

const JAR_MANIFEST: &str = "Manifest-Version: 1.0\r\nCreated-By: kodegen_bundler_apk\r\n\r\n";

/// Builds an archive entry name from `prefix` and a relative filesystem path.
///
/// Components are joined with `/` whatever the host separator is, and any
/// backslash left inside a component is converted as well.
///
/// ```
/// use kodegen_bundler_apk::bundler::utils::archive::entry_name;
/// use std::path::Path;
///
/// assert_eq!(entry_name("assets", Path::new("sub\\dir\\file.bin")), "assets/sub/dir/file.bin");
/// assert_eq!(entry_name("", Path::new("classes.dex")), "classes.dex");
/// ```
pub fn entry_name(prefix: &str, relative: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();
    if !prefix.is_empty() {
        parts.push(prefix.trim_end_matches('/').to_string());
    }
    for component in relative.components() {
        if let Component::Normal(part) = component {
            parts.extend(
                part.to_string_lossy()
                    .split('\\')
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
            );
        }
    }
    parts.join("/")
}

/// Scoped handle appending entries to an existing archive.
///
/// Existing entries are left untouched. The central directory is rewritten
/// by [`PackageUpdate::finish`]; if the handle is dropped early (a failed
/// append), the writer still finalizes the archive so the partially updated
/// package stays readable for inspection.
pub struct PackageUpdate {
    path: PathBuf,
    writer: ZipWriter<File>,
    added: Vec<String>,
}

impl PackageUpdate {
    /// Open `path` for appending.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .fs_context("opening package for update", path)?;
        let writer = ZipWriter::new_append(file)?;
        Ok(Self {
            path: path.to_path_buf(),
            writer,
            added: Vec::new(),
        })
    }

    /// Append the contents of `source` as an uncompressed entry named `name`.
    pub fn append_file(&mut self, name: &str, source: &Path) -> Result<()> {
        let mut input = File::open(source).fs_context("opening file to add to package", source)?;
        self.writer.start_file(name, stored_options())?;
        io::copy(&mut input, &mut self.writer).fs_context("writing package entry", &self.path)?;
        log::debug!("Added {} to {}", name, self.path.display());
        self.added.push(name.to_string());
        Ok(())
    }

    /// Write the central directory and close the archive.
    pub fn finish(self) -> Result<Vec<String>> {
        let Self { writer, added, .. } = self;
        writer.finish()?;
        Ok(added)
    }
}

/// Pack every file under `classes_dir` into a jar at `archive_path`.
///
/// Entries are written in sorted order with a fixed timestamp, preceded by
/// `META-INF/MANIFEST.MF`, so identical class trees give identical jars.
/// Returns the number of class-tree files packed.
pub fn create_class_archive(classes_dir: &Path, archive_path: &Path) -> Result<usize> {
    let file = File::create(archive_path).fs_context("creating class archive", archive_path)?;
    let mut writer = ZipWriter::new(file);

    writer.start_file("META-INF/MANIFEST.MF", deflated_options())?;
    writer
        .write_all(JAR_MANIFEST.as_bytes())
        .fs_context("writing jar manifest", archive_path)?;

    let mut count = 0;
    for entry in walkdir::WalkDir::new(classes_dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(classes_dir)?;
        writer.start_file(entry_name("", relative), deflated_options())?;
        let mut input =
            File::open(entry.path()).fs_context("opening compiled class", entry.path())?;
        io::copy(&mut input, &mut writer).fs_context("writing class archive", archive_path)?;
        count += 1;
    }

    writer.finish()?;
    Ok(count)
}

/// Names of all entries in the archive at `path`, in central directory order.
pub fn entry_names(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).fs_context("opening archive", path)?;
    let archive = ZipArchive::new(file)?;
    Ok(archive.file_names().map(str::to_string).collect())
}

/// Run blocking archive work off the async runtime.
pub async fn blocking<T, F>(task: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| Error::GenericError(format!("archive task panicked: {e}")))?
}

fn stored_options() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
}

fn deflated_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
}
