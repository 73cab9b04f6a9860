//! Stages 6 and 7: translate `classes.jar` to dex and merge it into `base.apk`.

use super::BuildContext;
use crate::bundler::{
    error::{Error, Result},
    utils::{
        archive::{PackageUpdate, blocking},
        fs,
        process::ToolRunner,
    },
};

/// Run `d8` over `classes.jar` and every library, writing `*.dex` into
/// `build/`. Returns the number of dex files produced.
///
/// The platform archive is passed with `--lib` so framework references
/// resolve without being translated.
pub async fn generate<R: ToolRunner>(ctx: &BuildContext<'_, R>) -> Result<usize> {
    let build_dir = ctx.settings.build_dir();
    log::info!(
        "Generating dex for classes.jar and {} libraries (min API {})",
        ctx.libraries.len(),
        ctx.settings.min_api()
    );

    let invocation = ctx
        .invocation("d8", ctx.tools.d8())
        .arg(ctx.settings.classes_archive_path())
        .args(ctx.libraries.archives())
        .arg("--lib")
        .arg(ctx.tools.platform_archive())
        .arg("--min-api")
        .arg(ctx.settings.min_api().to_string())
        .arg("--output")
        .arg(&build_dir);
    ctx.run(invocation).await?;

    let dex_files = fs::list_files_with_extension(&build_dir, "dex").await?;
    if dex_files.is_empty() {
        return Err(Error::GenericError(format!(
            "d8 reported success but wrote no .dex files to {}",
            build_dir.display()
        )));
    }
    Ok(dex_files.len())
}

/// Append every top-level `build/*.dex` to `base.apk` under its bare file
/// name, in file name order (`classes.dex`, `classes2.dex`, ...).
///
/// Returns the number of entries added.
pub async fn merge<R>(ctx: &BuildContext<'_, R>) -> Result<usize> {
    let dex_files = fs::list_files_with_extension(&ctx.settings.build_dir(), "dex").await?;
    if dex_files.is_empty() {
        return Err(Error::GenericError(
            "no .dex files to merge into the package".to_string(),
        ));
    }

    let package = ctx.settings.base_package_path();
    let added = blocking(move || {
        let mut update = PackageUpdate::open(&package)?;
        for path in &dex_files {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    Error::GenericError(format!("dex path has no file name: {}", path.display()))
                })?;
            update.append_file(&name, path)?;
        }
        update.finish()
    })
    .await?;

    for name in &added {
        log::info!("Added {name}");
    }
    Ok(added.len())
}
