//! External tool resolution.
//!
//! The Android build tools live in one configured directory; `javac` is
//! either configured explicitly or taken from `PATH`. Everything is checked
//! once, before the first stage runs.

use crate::bundler::{
    error::{Error, Result},
    settings::Settings,
};
use std::path::{Path, PathBuf};

#[cfg(windows)]
mod names {
    pub const AAPT2: &str = "aapt2.exe";
    pub const D8: &str = "d8.bat";
    pub const ZIPALIGN: &str = "zipalign.exe";
    pub const APKSIGNER: &str = "apksigner.bat";
}

#[cfg(not(windows))]
mod names {
    pub const AAPT2: &str = "aapt2";
    pub const D8: &str = "d8";
    pub const ZIPALIGN: &str = "zipalign";
    pub const APKSIGNER: &str = "apksigner";
}

pub use names::{AAPT2, APKSIGNER, D8, ZIPALIGN};

/// Debug keystore file name inside the tools directory.
pub const KEYSTORE: &str = "debug.keystore";

/// Resolved locations of every external tool the pipeline invokes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSet {
    aapt2: PathBuf,
    d8: PathBuf,
    zipalign: PathBuf,
    apksigner: PathBuf,
    keystore: PathBuf,
    platform_archive: PathBuf,
    javac: PathBuf,
}

impl ToolSet {
    /// Locate and validate all tools for `settings`.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingTool`] for the first tool file that is not a regular file
    /// - [`Error::ToolNotFound`] if `javac` is not configured and not on `PATH`
    pub fn resolve(settings: &Settings) -> Result<Self> {
        let tools_dir = settings.tools_dir();
        log::debug!("Resolving Android build tools in {}", tools_dir.display());

        let aapt2 = require("aapt2", tools_dir.join(AAPT2))?;
        let d8 = require("d8", tools_dir.join(D8))?;
        let zipalign = require("zipalign", tools_dir.join(ZIPALIGN))?;
        let apksigner = require("apksigner", tools_dir.join(APKSIGNER))?;
        let keystore = require("debug.keystore", tools_dir.join(KEYSTORE))?;
        let platform_archive = require("android.jar", settings.platform_archive().to_path_buf())?;

        let javac = match settings.javac() {
            Some(path) => require("javac", path.to_path_buf())?,
            None => find_on_path("javac")?,
        };

        Ok(Self {
            aapt2,
            d8,
            zipalign,
            apksigner,
            keystore,
            platform_archive,
            javac,
        })
    }

    pub fn aapt2(&self) -> &Path {
        &self.aapt2
    }

    pub fn d8(&self) -> &Path {
        &self.d8
    }

    pub fn zipalign(&self) -> &Path {
        &self.zipalign
    }

    pub fn apksigner(&self) -> &Path {
        &self.apksigner
    }

    pub fn keystore(&self) -> &Path {
        &self.keystore
    }

    pub fn platform_archive(&self) -> &Path {
        &self.platform_archive
    }

    pub fn javac(&self) -> &Path {
        &self.javac
    }
}

fn require(tool: &str, path: PathBuf) -> Result<PathBuf> {
    if path.is_file() {
        log::debug!("Found {} at: {}", tool, path.display());
        Ok(path)
    } else {
        Err(Error::MissingTool {
            tool: tool.to_string(),
            path,
        })
    }
}

fn find_on_path(tool: &str) -> Result<PathBuf> {
    match which::which(tool) {
        Ok(path) => {
            log::debug!("Found {} at: {}", tool, path.display());
            Ok(path)
        }
        Err(e) => {
            log::debug!("{} not found in PATH: {}", tool, e);
            Err(Error::ToolNotFound {
                tool: tool.to_string(),
            })
        }
    }
}
