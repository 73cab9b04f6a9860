//! Android APK bundler library
//!
//! Drives an Android project directory (`AndroidManifest.xml`, `res/`,
//! `java/`, optional `assets/` and `library.lib`) through the SDK build
//! tools to a signed, aligned APK:
//!
//! clean, `aapt2 compile`, `aapt2 link`, `javac`, classes.jar, `d8`,
//! dex merge, asset injection, `zipalign`, `apksigner`.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
