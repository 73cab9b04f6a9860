//! Command line argument parsing and validation.
//!
//! Every option can also come from the environment or the config file; see
//! [`crate::bundler::SettingsBuilder`] for the precedence.

use crate::bundler::{ConfigFile, Result as BundleResult, Settings, SettingsBuilder};
use clap::Parser;
use std::path::PathBuf;

/// Android APK bundler
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_apk",
    version,
    about = "Builds a signed APK from an Android project directory",
    long_about = "Builds a signed, aligned APK from an Android project directory.

The project directory holds AndroidManifest.xml, res/, java/ and optionally
assets/ and library.lib. Intermediate files go to <PROJECT_DIR>/build; the APK
is written next to the project as <name>_signed.apk.

Usage:
  kodegen_bundler_apk apps/Hello
  kodegen_bundler_apk apps/Hello --tools-dir /opt/android-tools --min-api 24
  APK_TOOLS_DIR=/opt/android-tools kodegen_bundler_apk apps/Hello --json

Exit code 0 = APK guaranteed to exist at the printed path."
)]
pub struct Args {
    /// Android project directory
    #[arg(value_name = "PROJECT_DIR")]
    pub project_dir: PathBuf,

    /// Directory holding aapt2, d8, zipalign, apksigner and debug.keystore
    #[arg(long, env = "APK_TOOLS_DIR", value_name = "DIR")]
    pub tools_dir: Option<PathBuf>,

    /// Platform android.jar to compile and link against
    #[arg(long, env = "ANDROID_JAR", value_name = "PATH")]
    pub platform_jar: Option<PathBuf>,

    /// Java compiler (default: javac on PATH)
    #[arg(long, env = "APK_JAVAC", value_name = "PATH")]
    pub javac: Option<PathBuf>,

    /// Minimum Android API level passed to d8
    #[arg(
        long,
        env = "APK_MIN_API",
        value_name = "LEVEL",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub min_api: Option<u32>,

    /// Config file (default: <config dir>/kodegen/apk-bundler.toml)
    #[arg(long, env = "APK_BUNDLER_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the built artifact as JSON instead of its path
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if !self.project_dir.is_dir() {
            return Err(format!(
                "project directory {} does not exist or is not a directory",
                self.project_dir.display()
            ));
        }
        if let Some(dir) = &self.tools_dir
            && !dir.is_dir()
        {
            return Err(format!("tools directory {} does not exist", dir.display()));
        }
        Ok(())
    }

    /// Resolve flags, environment and config file into [`Settings`].
    pub fn settings(&self) -> BundleResult<Settings> {
        let config = ConfigFile::discover(self.config.as_deref())?;
        let mut builder = SettingsBuilder::new()
            .project_dir(&self.project_dir)
            .config_file(config);

        if let Some(dir) = &self.tools_dir {
            builder = builder.tools_dir(dir);
        }
        if let Some(jar) = &self.platform_jar {
            builder = builder.platform_archive(jar);
        }
        if let Some(javac) = &self.javac {
            builder = builder.javac(javac);
        }
        if let Some(level) = self.min_api {
            builder = builder.min_api(level);
        }

        builder.build()
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
    json: bool,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        // JSON mode keeps stderr free of status lines
        let output = super::OutputManager::new(args.json);

        Self {
            output,
            json: args.json,
        }
    }
}

impl RuntimeConfig {
    /// Whether the artifact should be reported as JSON
    pub fn json(&self) -> bool {
        self.json
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}
