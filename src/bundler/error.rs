//! Error types for the APK build pipeline.
//!
//! Every condition here is fatal: the orchestrator stops at the first stage
//! that returns one and never retries.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error as DeriveError;

/// Result type alias for bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving tools or running pipeline stages.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// A required tool file is absent from its expected location.
    #[error("missing tool `{tool}`: expected at {}", path.display())]
    MissingTool {
        /// Logical tool name (e.g. `aapt2`).
        tool: String,
        /// Path where the tool was expected.
        path: PathBuf,
    },

    /// A `library.lib` entry does not reference an existing file.
    #[error("library.lib entry `{line}` does not reference a file ({})", path.display())]
    MissingLibrary {
        /// The manifest line as written.
        line: String,
        /// The path the line resolved to.
        path: PathBuf,
    },

    /// The project has no `res/` directory.
    #[error("resource directory not found: {}", path.display())]
    MissingResourceDirectory {
        /// Expected resource directory.
        path: PathBuf,
    },

    /// The project has no `AndroidManifest.xml`.
    #[error("application manifest not found: {}", path.display())]
    MissingManifest {
        /// Expected manifest path.
        path: PathBuf,
    },

    /// `java/` is missing or holds no `.java` files.
    #[error("no .java source files found under {}", path.display())]
    NoSourceFiles {
        /// Searched source directory.
        path: PathBuf,
    },

    /// An external tool ran but reported failure.
    #[error("{tool} failed with {}", describe_exit(*exit_code))]
    ToolInvocationFailed {
        /// Logical tool name.
        tool: String,
        /// Exit code, `None` if the process was terminated by a signal.
        exit_code: Option<i32>,
    },

    /// The tool binary could not be found on the execution path.
    #[error("tool `{tool}` not found on the execution path")]
    ToolNotFound {
        /// Logical tool name.
        tool: String,
    },

    /// `aligned.package` changed between alignment and signing.
    #[error("{} was modified after alignment; refusing to sign", path.display())]
    PackageModifiedAfterAlignment {
        /// The aligned package.
        path: PathBuf,
    },

    /// `advance()` was called on a pipeline in a terminal state.
    #[error("pipeline is in terminal state `{state}`; start a new build")]
    PipelineHalted {
        /// The terminal state.
        state: String,
    },

    /// Labels the stage in which `source` occurred.
    #[error("{stage} failed: {source}")]
    StageFailed {
        /// Human readable stage label.
        stage: &'static str,
        /// Underlying error.
        source: Box<Error>,
    },

    /// Filesystem error with the operation and path attached.
    #[error("{context} {}: {error}", path.display())]
    Fs {
        /// What was being done.
        context: &'static str,
        /// Path involved.
        path: PathBuf,
        /// Underlying IO error.
        error: io::Error,
    },

    /// Spawning a command failed for a reason other than a missing binary.
    #[error("failed to run command {command}: {error}")]
    CommandFailed {
        /// Program that was being spawned.
        command: String,
        /// Underlying IO error.
        error: io::Error,
    },

    /// Plain IO error.
    #[error(transparent)]
    IoError(#[from] io::Error),

    /// Archive read/write error.
    #[error(transparent)]
    ZipError(#[from] zip::result::ZipError),

    /// Directory traversal error.
    #[error(transparent)]
    WalkDirError(#[from] walkdir::Error),

    /// Path prefix stripping error.
    #[error(transparent)]
    StripPrefixError(#[from] std::path::StripPrefixError),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl Error {
    /// Returns the innermost error, unwrapping any stage labels.
    pub fn root_cause(&self) -> &Error {
        let mut current = self;
        while let Error::StageFailed { source, .. } = current {
            current = source;
        }
        current
    }
}

/// Convenient early return with a [`Error::GenericError`].
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::Error::GenericError($msg.into()))
    };
    ($err:expr $(,)?) => {
        return Err($crate::bundler::Error::GenericError($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($fmt, $($arg)*)))
    };
}

/// Attach a message to errors and missing values.
pub trait Context<T> {
    /// Wrap the failure with `context`.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::GenericError(format!("{context}: {e}")))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }
}

/// Attach filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Map an IO error into [`Error::Fs`] naming the operation and path.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_cause_unwraps_stage_labels() {
        let err = Error::StageFailed {
            stage: "compile resources",
            source: Box::new(Error::MissingResourceDirectory {
                path: PathBuf::from("/app/res"),
            }),
        };
        assert!(matches!(
            err.root_cause(),
            Error::MissingResourceDirectory { .. }
        ));
        assert!(err.to_string().starts_with("compile resources failed:"));
    }

    #[test]
    fn tool_failure_message_names_exit_code() {
        let err = Error::ToolInvocationFailed {
            tool: "javac".into(),
            exit_code: Some(2),
        };
        assert_eq!(err.to_string(), "javac failed with exit code 2");

        let killed = Error::ToolInvocationFailed {
            tool: "d8".into(),
            exit_code: None,
        };
        assert!(killed.to_string().contains("terminated by signal"));
    }

    #[test]
    fn fs_context_keeps_path() {
        let res: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = res.fs_context("reading library manifest", "/app/library.lib");
        match err {
            Err(Error::Fs { context, path, .. }) => {
                assert_eq!(context, "reading library manifest");
                assert_eq!(path, PathBuf::from("/app/library.lib"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
