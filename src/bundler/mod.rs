//! APK bundling pipeline.
//!
//! Turns an Android project directory (manifest, `res/`, `java/`, optional
//! `assets/` and `library.lib`) into a signed APK by driving the Android
//! build tools in a fixed order:
//!
//! ```text
//! clean → aapt2 compile → aapt2 link → javac → classes.jar → d8
//!       → merge dex → inject assets → zipalign → apksigner
//! ```
//!
//! # Module Organization
//!
//! - [`builder`] - [`Bundler`] orchestrator, build state machine, tool resolution
//! - [`settings`] - [`Settings`] and the library manifest reader
//! - [`platform`] - the individual Android build stages
//! - [`utils`] - filesystem, process and archive helpers
//! - [`error`] - error taxonomy

pub mod builder;
pub mod error;
pub mod platform;
pub mod settings;
pub mod utils;

pub use builder::{BuildState, Bundler, BundledArtifact, Stage, ToolSet};
pub use error::{Error, Result};
pub use settings::{ConfigFile, LibraryManifest, Settings, SettingsBuilder};
pub use utils::process::{ProcessRunner, ToolInvocation, ToolOutput, ToolRunner};
