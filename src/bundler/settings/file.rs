//! Optional TOML config file.
//!
//! Supplies tool locations that would otherwise have to be passed on every
//! invocation:
//!
//! ```toml
//! tools_dir = "/opt/android-tools"
//! platform_jar = "/opt/android-sdk/platforms/android-34/android.jar"
//! javac = "/usr/lib/jvm/java-17/bin/javac"
//! min_api = 21
//! ```

use crate::bundler::error::{Error, ErrorExt, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Contents of `apk-bundler.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Directory containing the Android build tools and keystore.
    #[serde(default)]
    pub tools_dir: Option<PathBuf>,

    /// Path to the platform `android.jar`.
    #[serde(default)]
    pub platform_jar: Option<PathBuf>,

    /// Java compiler to invoke.
    #[serde(default)]
    pub javac: Option<PathBuf>,

    /// Minimum API level for `d8`.
    #[serde(default)]
    pub min_api: Option<u32>,
}

impl ConfigFile {
    /// Default location: `<config dir>/kodegen/apk-bundler.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("kodegen").join("apk-bundler.toml"))
    }

    /// Parse a config file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).fs_context("reading config file", path)?;
        Self::parse(&content)
            .map_err(|e| Error::GenericError(format!("invalid config file {}: {e}", path.display())))
    }

    /// Load `explicit` if given, otherwise the default location when it exists.
    ///
    /// A missing default file yields an empty config; a missing explicit file
    /// is an error.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => {
                log::debug!("Using config file {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
