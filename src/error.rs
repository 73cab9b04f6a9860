//! Top-level error types for the command line front end.
//!
//! Pipeline failures are [`crate::bundler::Error`]; this module wraps them
//! together with argument and output errors and attaches hints for the user.

use crate::bundler::Error as PipelineError;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all CLI operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Bundler errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] PipelineError),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        let BundlerError::Bundler(error) = self else {
            return Vec::new();
        };
        match error.root_cause() {
            PipelineError::MissingTool { .. } => vec![
                "Point --tools-dir (or APK_TOOLS_DIR) at a directory holding aapt2, d8, zipalign, apksigner and debug.keystore".to_string(),
            ],
            PipelineError::ToolNotFound { tool } if tool == "javac" => vec![
                "Install a JDK or pass --javac (or APK_JAVAC) with the compiler path".to_string(),
            ],
            PipelineError::MissingLibrary { .. } => vec![
                "Fix or remove the entry in library.lib; relative paths resolve against the current directory".to_string(),
            ],
            PipelineError::MissingResourceDirectory { .. } => {
                vec!["Create res/ in the project directory".to_string()]
            }
            PipelineError::MissingManifest { .. } => {
                vec!["Add AndroidManifest.xml to the project directory".to_string()]
            }
            PipelineError::NoSourceFiles { .. } => {
                vec!["Place .java sources under java/ in the project directory".to_string()]
            }
            PipelineError::ToolInvocationFailed { tool, .. } => vec![format!(
                "Run with RUST_LOG=debug to see the full {tool} command line and output"
            )],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn suggestions_follow_root_cause() {
        let err = BundlerError::from(PipelineError::StageFailed {
            stage: "compile resources (aapt2 compile)",
            source: Box::new(PipelineError::MissingResourceDirectory {
                path: PathBuf::from("/p/res"),
            }),
        });
        assert_eq!(
            err.recovery_suggestions(),
            vec!["Create res/ in the project directory".to_string()]
        );
    }

    #[test]
    fn cli_errors_have_no_suggestions() {
        let err = BundlerError::from(CliError::InvalidArguments {
            reason: "x".to_string(),
        });
        assert!(err.recovery_suggestions().is_empty());
    }
}
