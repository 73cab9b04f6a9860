//! External tool execution.
//!
//! Stages never spawn processes directly. They describe the call as a
//! [`ToolInvocation`] and hand it to a [`ToolRunner`], so the pipeline can be
//! exercised against a test double without an Android SDK installed.

use crate::bundler::error::{Error, Result};
use std::{
    ffi::OsString,
    future::Future,
    io,
    path::{Path, PathBuf},
    process::Stdio,
};

/// A single external tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    /// Logical tool name used in logs and errors (e.g. `aapt2`).
    pub tool: String,
    /// Executable to spawn.
    pub program: PathBuf,
    /// Argument vector, excluding the program itself.
    pub args: Vec<OsString>,
    /// Working directory, inherited when `None`.
    pub current_dir: Option<PathBuf>,
}

impl ToolInvocation {
    pub fn new(tool: impl Into<String>, program: impl Into<PathBuf>) -> Self {
        Self {
            tool: tool.into(),
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Position of the first argument equal to `flag`.
    pub fn position(&self, flag: &str) -> Option<usize> {
        self.args.iter().position(|a| a == flag)
    }

    /// Value following `flag`, e.g. `value_of("-o")`.
    pub fn value_of(&self, flag: &str) -> Option<&OsString> {
        self.position(flag).and_then(|i| self.args.get(i + 1))
    }

    /// Space separated rendering for logs. Not shell-escaped.
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

/// Outcome of a finished tool process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code; `None` when terminated by a signal.
    pub exit_code: Option<i32>,
    /// Whether the tool reported success.
    pub success: bool,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl ToolOutput {
    /// A successful run with no output.
    pub fn ok() -> Self {
        Self {
            exit_code: Some(0),
            success: true,
            ..Default::default()
        }
    }

    /// A failed run with the given exit code and diagnostics.
    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(exit_code),
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Capability to run an external tool and wait for it to finish.
pub trait ToolRunner {
    /// Run `invocation` to completion.
    ///
    /// Returns `Err` only when the process could not be started; a tool that
    /// starts and fails is reported through [`ToolOutput::success`].
    fn run(&self, invocation: &ToolInvocation) -> impl Future<Output = Result<ToolOutput>> + Send;
}

/// [`ToolRunner`] spawning real processes with `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    async fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput> {
        let mut cmd = tokio::process::Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &invocation.current_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().await.map_err(|error| {
            if error.kind() == io::ErrorKind::NotFound {
                Error::ToolNotFound {
                    tool: invocation.tool.clone(),
                }
            } else {
                Error::CommandFailed {
                    command: invocation.program.display().to_string(),
                    error,
                }
            }
        })?;

        Ok(ToolOutput {
            exit_code: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Run `invocation` and turn a non-zero exit into [`Error::ToolInvocationFailed`].
///
/// Captured output is forwarded to the log: stdout at debug level, stderr
/// as warnings on success and as errors on failure.
pub async fn run_checked<R: ToolRunner>(
    runner: &R,
    invocation: &ToolInvocation,
) -> Result<ToolOutput> {
    log::debug!("Running: {}", invocation.command_line());

    let output = runner.run(invocation).await?;

    for line in output.stdout.lines().filter(|l| !l.trim().is_empty()) {
        log::debug!("[{}] {}", invocation.tool, line);
    }

    if output.success {
        for line in output.stderr.lines().filter(|l| !l.trim().is_empty()) {
            log::warn!("[{}] {}", invocation.tool, line);
        }
        Ok(output)
    } else {
        for line in output.stderr.lines().filter(|l| !l.trim().is_empty()) {
            log::error!("[{}] {}", invocation.tool, line);
        }
        Err(Error::ToolInvocationFailed {
            tool: invocation.tool.clone(),
            exit_code: output.exit_code,
        })
    }
}
