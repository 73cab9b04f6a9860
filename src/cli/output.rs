//! Colored user-facing output.
//!
//! Everything here goes to stderr; stdout carries only the artifact path or
//! its JSON report so the binary can be used in scripts.

use cyrup_termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use std::io::{self, IsTerminal, Write};

/// Writes status messages with a colored prefix.
#[derive(Debug, Clone)]
pub struct OutputManager {
    quiet: bool,
    color_choice: ColorChoice,
}

impl OutputManager {
    /// `quiet` suppresses everything.
    pub fn new(quiet: bool) -> Self {
        let color_choice = if io::stderr().is_terminal() {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            quiet,
            color_choice,
        }
    }

    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_line(Some(Color::Green), "✓ ", message)
    }

    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stream = StandardStream::stderr(self.color_choice);
        stream.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(stream, "{title}")?;
        stream.reset()
    }

    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_line(None, "   ", message)
    }

    fn write_line(&self, color: Option<Color>, prefix: &str, message: &str) -> io::Result<()> {
        let mut stream = StandardStream::stderr(self.color_choice);
        stream.set_color(ColorSpec::new().set_fg(color).set_bold(color.is_some()))?;
        write!(stream, "{prefix}")?;
        stream.reset()?;
        writeln!(stream, "{message}")
    }
}
