//! Android APK build stages.
//!
//! Each stage reads what earlier stages left in the build directory and
//! either writes new artifacts there or updates `base.apk` in place:
//!
//! | Stage | Tool | Produces |
//! |-------|------|----------|
//! | [`clean`] | - | empty `build/` |
//! | [`resources::compile`] | `aapt2 compile` | `resources.zip` |
//! | [`resources::link`] | `aapt2 link` | `base.apk`, `generated-sources/` |
//! | [`java::compile`] | `javac` | `classes/` |
//! | [`jar::archive_classes`] | in-process | `classes.jar` |
//! | [`dex::generate`] | `d8` | `*.dex` |
//! | [`dex::merge`] | in-process | dex entries in `base.apk` |
//! | [`assets::inject`] | in-process | `assets/` entries in `base.apk` |
//! | [`zipalign::align`] | `zipalign` | `aligned.apk` |
//! | [`apksigner::sign`] | `apksigner` | `<name>_signed.apk` |
//!
//! Nothing may touch the package after [`zipalign::align`]; any later
//! mutation would break the 4-byte alignment of uncompressed entries.

pub mod apksigner;
pub mod assets;
pub mod clean;
pub mod dex;
pub mod jar;
pub mod java;
pub mod resources;
pub mod zipalign;

use crate::bundler::{
    builder::ToolSet,
    error::{Error, Result},
    settings::{LibraryManifest, Settings},
    utils::process::{ToolInvocation, ToolOutput, ToolRunner, run_checked},
};
use std::path::Path;

/// Everything a stage needs: configuration, resolved tools, libraries and
/// the tool runner.
pub struct BuildContext<'a, R> {
    pub settings: &'a Settings,
    pub tools: &'a ToolSet,
    pub libraries: &'a LibraryManifest,
    pub runner: &'a R,
}

impl<R: ToolRunner> BuildContext<'_, R> {
    /// Invocation of `program` running inside the build directory.
    pub fn invocation(&self, tool: &str, program: &Path) -> ToolInvocation {
        ToolInvocation::new(tool, program).current_dir(self.settings.build_dir())
    }

    /// Run `invocation`, failing on a non-zero exit.
    pub async fn run(&self, invocation: ToolInvocation) -> Result<ToolOutput> {
        run_checked(self.runner, &invocation).await
    }
}

/// Fail if a tool reported success without producing `path`.
fn expect_output(tool: &str, path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(Error::GenericError(format!(
            "{tool} reported success but did not produce {}",
            path.display()
        )))
    }
}
