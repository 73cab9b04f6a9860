//! Platform-specific build stages.
//!
//! - [`android`] - APK build stages (aapt2, javac, d8, zipalign, apksigner)

pub mod android;
