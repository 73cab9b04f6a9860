//! Stages 2 and 3: `aapt2 compile` and `aapt2 link`.

use super::{BuildContext, expect_output};
use crate::bundler::{
    error::{Error, Result},
    utils::{fs, process::ToolRunner},
};

/// Compile every file under `res/` into `build/resources.zip`.
///
/// # Errors
///
/// [`Error::MissingResourceDirectory`] when `res/` does not exist; no tool
/// is invoked in that case.
pub async fn compile<R: ToolRunner>(ctx: &BuildContext<'_, R>) -> Result<()> {
    let resource_dir = ctx.settings.resource_dir();
    if !resource_dir.is_dir() {
        return Err(Error::MissingResourceDirectory { path: resource_dir });
    }

    let output = ctx.settings.compiled_resources_path();
    log::info!("Compiling resources from {}", resource_dir.display());

    let invocation = ctx
        .invocation("aapt2", ctx.tools.aapt2())
        .arg("compile")
        .arg("--dir")
        .arg(&resource_dir)
        .arg("-o")
        .arg(&output);
    ctx.run(invocation).await?;

    expect_output("aapt2 compile", &output)
}

/// Link the manifest and compiled resources against the platform archive.
///
/// Produces `build/base.apk` and writes the generated `R` sources into
/// `build/generated-sources/`.
pub async fn link<R: ToolRunner>(ctx: &BuildContext<'_, R>) -> Result<()> {
    let manifest = ctx.settings.manifest_path();
    if !manifest.is_file() {
        return Err(Error::MissingManifest { path: manifest });
    }

    let generated = ctx.settings.generated_sources_dir();
    fs::create_dir_all(&generated, false).await?;

    let output = ctx.settings.base_package_path();
    log::info!("Linking {}", manifest.display());

    let invocation = ctx
        .invocation("aapt2", ctx.tools.aapt2())
        .arg("link")
        .arg("-o")
        .arg(&output)
        .arg("-I")
        .arg(ctx.tools.platform_archive())
        .arg("--manifest")
        .arg(&manifest)
        .arg("-R")
        .arg(ctx.settings.compiled_resources_path())
        .arg("--java")
        .arg(&generated)
        .arg("--auto-add-overlay");
    ctx.run(invocation).await?;

    expect_output("aapt2 link", &output)
}
