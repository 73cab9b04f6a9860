//! Command line interface for the APK bundler.
//!
//! Parses arguments, resolves [`Settings`](crate::bundler::Settings), runs the
//! pipeline and reports the signed APK.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::bundler::Bundler;
use crate::error::{CliError, Result};

/// Main CLI entry point
///
/// Returns the process exit code. Pipeline failures are returned as `Err`
/// and mapped to exit code 1 by the binary.
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let runtime_config = RuntimeConfig::from(&args);
    let settings = args.settings()?;

    runtime_config.section(&format!("Building {}", settings.project_name()))?;
    runtime_config.indent(&format!("project: {}", settings.input_dir().display()))?;
    runtime_config.indent(&format!("tools:   {}", settings.tools_dir().display()))?;

    let mut bundler = Bundler::new(settings)?;
    let artifact = bundler.bundle().await?;

    if runtime_config.json() {
        println!("{}", serde_json::to_string_pretty(&artifact)?);
    } else {
        runtime_config.success(&format!(
            "Signed APK ({} bytes, sha256 {})",
            artifact.size, artifact.checksum
        ))?;
        println!("{}", artifact.path.display());
    }

    Ok(0)
}
