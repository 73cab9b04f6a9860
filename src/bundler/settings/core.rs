//! Core Settings struct and derived build paths.

use std::path::{Path, PathBuf};

/// Minimum Android API level passed to `d8` unless configured otherwise.
pub const DEFAULT_MIN_API: u32 = 21;

/// Java `-source`/`-target` level.
pub const JAVA_LANGUAGE_LEVEL: &str = "8";

/// Encoding of project `.java` files.
pub const JAVA_SOURCE_ENCODING: &str = "UTF-8";

/// Byte boundary `zipalign` aligns uncompressed entries to.
pub const ALIGNMENT_BOUNDARY: u32 = 4;

/// Build configuration for one project directory.
///
/// Every path returned by the accessors is a pure function of the project
/// directory, the tools directory and the platform archive path. The build
/// directory lives inside the project, the signed APK next to it.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_apk::bundler::SettingsBuilder;
///
/// # fn example() -> kodegen_bundler_apk::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_dir("apps/Hello")
///     .tools_dir("/opt/android-tools")
///     .build()?;
///
/// // apps/Hello_signed.apk
/// println!("{}", settings.final_package_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Absolute project directory.
    input_dir: PathBuf,

    /// Directory holding aapt2, d8, zipalign, apksigner and the keystore.
    tools_dir: PathBuf,

    /// `android.jar` of the target platform.
    platform_archive: PathBuf,

    /// Explicit `javac`; `None` means look it up on `PATH`.
    javac: Option<PathBuf>,

    /// `--min-api` for `d8`.
    min_api: u32,
}

impl Settings {
    /// Returns the project directory.
    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    /// Returns the tools directory.
    pub fn tools_dir(&self) -> &Path {
        &self.tools_dir
    }

    /// Returns the platform archive (`android.jar`).
    pub fn platform_archive(&self) -> &Path {
        &self.platform_archive
    }

    /// Returns the configured `javac`, if any.
    pub fn javac(&self) -> Option<&Path> {
        self.javac.as_deref()
    }

    /// Returns the minimum API level for dexing.
    pub fn min_api(&self) -> u32 {
        self.min_api
    }

    /// Scratch directory, wiped at the start of every build.
    pub fn build_dir(&self) -> PathBuf {
        self.input_dir.join("build")
    }

    /// Directory receiving the signed APK (parent of the project).
    pub fn output_dir(&self) -> PathBuf {
        self.input_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.input_dir.clone())
    }

    /// Project name, taken from the project directory's base name.
    pub fn project_name(&self) -> String {
        self.input_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// `<parent>/<name>_signed.apk`.
    pub fn final_package_path(&self) -> PathBuf {
        self.output_dir()
            .join(format!("{}_signed.apk", self.project_name()))
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.input_dir.join("AndroidManifest.xml")
    }

    pub fn resource_dir(&self) -> PathBuf {
        self.input_dir.join("res")
    }

    pub fn source_dir(&self) -> PathBuf {
        self.input_dir.join("java")
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.input_dir.join("assets")
    }

    pub fn library_manifest_path(&self) -> PathBuf {
        self.input_dir.join(super::LIBRARY_MANIFEST_FILE)
    }

    /// Output of `aapt2 compile`.
    pub fn compiled_resources_path(&self) -> PathBuf {
        self.build_dir().join("resources.zip")
    }

    /// Output of `aapt2 link`; later receives dex files and assets.
    pub fn base_package_path(&self) -> PathBuf {
        self.build_dir().join("base.apk")
    }

    /// `R.java` output of `aapt2 link`.
    pub fn generated_sources_dir(&self) -> PathBuf {
        self.build_dir().join("generated-sources")
    }

    pub fn classes_dir(&self) -> PathBuf {
        self.build_dir().join("classes")
    }

    pub fn classes_archive_path(&self) -> PathBuf {
        self.build_dir().join("classes.jar")
    }

    pub fn aligned_package_path(&self) -> PathBuf {
        self.build_dir().join("aligned.apk")
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        input_dir: PathBuf,
        tools_dir: PathBuf,
        platform_archive: PathBuf,
        javac: Option<PathBuf>,
        min_api: u32,
    ) -> Self {
        Self {
            input_dir,
            tools_dir,
            platform_archive,
            javac,
            min_api,
        }
    }
}
