//! Configuration for bundling operations.
//!
//! [`Settings`] is the single immutable value every stage reads its paths
//! from. It is assembled by [`SettingsBuilder`] from CLI flags, environment
//! and an optional [`ConfigFile`], and paired with the project's
//! [`LibraryManifest`].

mod builder;
mod core;
mod file;
mod libraries;

pub use builder::SettingsBuilder;
pub use core::{
    ALIGNMENT_BOUNDARY, DEFAULT_MIN_API, JAVA_LANGUAGE_LEVEL, JAVA_SOURCE_ENCODING, Settings,
};
pub use file::ConfigFile;
pub use libraries::{LIBRARY_MANIFEST_FILE, LibraryManifest};
