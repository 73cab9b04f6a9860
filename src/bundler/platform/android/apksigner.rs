//! Stage 10: sign the aligned package with the debug keystore.

use super::{BuildContext, expect_output};
use crate::bundler::{
    builder::{SigningCredential, checksum::calculate_sha256},
    error::{Error, ErrorExt, Result},
    utils::process::ToolRunner,
};
use std::io;

/// Sign `aligned.apk` into `<output_dir>/<name>_signed.apk`.
///
/// `expected_checksum` is the digest [`super::zipalign::align`] returned.
/// APK Signature Scheme v4 is disabled so no `.idsig` file appears next to
/// the final package.
///
/// # Errors
///
/// [`Error::PackageModifiedAfterAlignment`] if `aligned.apk` no longer
/// matches `expected_checksum`; `apksigner` is not run in that case.
pub async fn sign<R: ToolRunner>(ctx: &BuildContext<'_, R>, expected_checksum: &str) -> Result<()> {
    let aligned = ctx.settings.aligned_package_path();
    if calculate_sha256(&aligned).await? != expected_checksum {
        return Err(Error::PackageModifiedAfterAlignment { path: aligned });
    }

    let output = ctx.settings.final_package_path();
    match tokio::fs::remove_file(&output).await {
        Ok(()) => log::debug!("Removed previous {}", output.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e).fs_context("removing previous signed package", &output),
    }

    log::info!("Signing {}", aligned.display());
    let credential = SigningCredential::debug(ctx.tools.keystore());
    let invocation = ctx
        .invocation("apksigner", ctx.tools.apksigner())
        .arg("sign")
        .args(credential.signer_args())
        .arg("--v4-signing-enabled")
        .arg("false")
        .arg("--out")
        .arg(&output)
        .arg(&aligned);
    ctx.run(invocation).await?;

    expect_output("apksigner", &output)?;
    log::info!("Signed: {}", output.display());
    Ok(())
}
