//! Stage 9: align the package.

use super::{BuildContext, expect_output};
use crate::bundler::{
    builder::checksum::calculate_sha256,
    error::Result,
    settings::ALIGNMENT_BOUNDARY,
    utils::process::ToolRunner,
};

/// Align uncompressed entries of `base.apk` to a 4-byte boundary, writing
/// `aligned.apk`.
///
/// Returns the SHA-256 of `aligned.apk`. The signing stage checks it again
/// so a package touched after alignment is never signed.
pub async fn align<R: ToolRunner>(ctx: &BuildContext<'_, R>) -> Result<String> {
    let input = ctx.settings.base_package_path();
    let output = ctx.settings.aligned_package_path();
    log::info!("Aligning {}", input.display());

    let invocation = ctx
        .invocation("zipalign", ctx.tools.zipalign())
        .arg("-f")
        .arg(ALIGNMENT_BOUNDARY.to_string())
        .arg(&input)
        .arg(&output);
    ctx.run(invocation).await?;
    expect_output("zipalign", &output)?;

    let checksum = calculate_sha256(&output).await?;
    log::debug!("{} sha256 {checksum}", output.display());
    Ok(checksum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{
        platform::android::testing::{Fixture, Recorder, write_package},
        utils::process::ToolOutput,
    };
    use std::path::PathBuf;

    fn copying_zipalign() -> Recorder {
        Recorder::new(|inv| {
            let n = inv.args.len();
            std::fs::copy(&inv.args[n - 2], &inv.args[n - 1]).unwrap();
            ToolOutput::ok()
        })
    }

    #[tokio::test]
    async fn aligns_to_four_bytes_and_pins_checksum() {
        let fx = Fixture::new();
        write_package(&fx.settings.base_package_path());
        let runner = copying_zipalign();

        let checksum = align(&fx.ctx(&runner)).await.unwrap();

        let call = &runner.calls()[0];
        assert_eq!(call.args[0], "-f");
        assert_eq!(call.args[1], "4");
        assert_eq!(PathBuf::from(&call.args[2]), fx.settings.base_package_path());
        assert_eq!(PathBuf::from(&call.args[3]), fx.settings.aligned_package_path());
        assert_eq!(
            checksum,
            calculate_sha256(&fx.settings.aligned_package_path()).await.unwrap()
        );
    }

    #[tokio::test]
    async fn missing_output_is_error() {
        let fx = Fixture::new();
        write_package(&fx.settings.base_package_path());
        let err = align(&fx.ctx(&Recorder::succeeding())).await.unwrap_err();
        assert!(err.to_string().contains("zipalign"));
    }
}
