//! Builder for constructing Settings.

use super::{ConfigFile, DEFAULT_MIN_API, Settings};
use crate::bundler::error::{Context, ErrorExt, Result};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Explicit setters win over values from a [`ConfigFile`], which win over
/// the defaults:
///
/// - tools directory: `tools/` next to the running executable
/// - platform archive: `<tools dir>/android.jar`
/// - `javac`: looked up on `PATH` when the tool set is resolved
/// - minimum API: [`DEFAULT_MIN_API`]
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_apk::bundler::{ConfigFile, SettingsBuilder};
///
/// # fn example() -> kodegen_bundler_apk::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_dir("apps/Hello")
///     .config_file(ConfigFile::discover(None)?)
///     .min_api(24)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default, Debug)]
pub struct SettingsBuilder {
    project_dir: Option<PathBuf>,
    tools_dir: Option<PathBuf>,
    platform_archive: Option<PathBuf>,
    javac: Option<PathBuf>,
    min_api: Option<u32>,
    config: ConfigFile,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the project directory.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn project_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the tools directory.
    pub fn tools_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.tools_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the platform archive (`android.jar`).
    pub fn platform_archive<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.platform_archive = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the Java compiler to invoke.
    pub fn javac<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.javac = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the minimum API level for dexing.
    pub fn min_api(mut self, level: u32) -> Self {
        self.min_api = Some(level);
        self
    }

    /// Applies values from a config file underneath the explicit setters.
    pub fn config_file(mut self, config: ConfigFile) -> Self {
        self.config = config;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the project directory is missing or has no base
    /// name, or if no tools directory is given and the executable location
    /// cannot be determined.
    pub fn build(self) -> Result<Settings> {
        let project_dir = self
            .project_dir
            .context("project directory is required")?;
        let input_dir = absolute(&project_dir)?;
        if input_dir.file_name().is_none() {
            crate::bail!(
                "project directory {} has no name to derive the package name from",
                input_dir.display()
            );
        }

        let tools_dir = match self.tools_dir.or(self.config.tools_dir) {
            Some(dir) => absolute(&dir)?,
            None => default_tools_dir()?,
        };

        let platform_archive = match self.platform_archive.or(self.config.platform_jar) {
            Some(path) => absolute(&path)?,
            None => tools_dir.join("android.jar"),
        };

        let javac = self.javac.or(self.config.javac);
        let min_api = self.min_api.or(self.config.min_api).unwrap_or(DEFAULT_MIN_API);

        Ok(Settings::new(
            input_dir,
            tools_dir,
            platform_archive,
            javac,
            min_api,
        ))
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(path
        .absolutize()
        .fs_context("resolving absolute path", path)?
        .into_owned())
}

/// `tools/` beside the running executable.
fn default_tools_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().fs_context("locating current executable", "")?;
    let dir = exe
        .parent()
        .context("current executable has no parent directory")?;
    Ok(dir.join("tools"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_dir_is_required() {
        assert!(SettingsBuilder::new().tools_dir("/t").build().is_err());
    }

    #[test]
    fn platform_archive_defaults_into_tools_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let tools = tmp.path().join("tools");
        let settings = SettingsBuilder::new()
            .project_dir(tmp.path().join("Hello"))
            .tools_dir(&tools)
            .build()
            .unwrap();
        assert_eq!(settings.platform_archive(), tools.join("android.jar"));
        assert_eq!(settings.min_api(), DEFAULT_MIN_API);
        assert_eq!(settings.javac(), None);
    }

    #[test]
    fn explicit_values_override_config_file() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ConfigFile {
            tools_dir: Some(tmp.path().join("from-config")),
            platform_jar: None,
            javac: Some(PathBuf::from("/cfg/javac")),
            min_api: Some(26),
        };
        let settings = SettingsBuilder::new()
            .project_dir(tmp.path().join("Hello"))
            .config_file(config)
            .min_api(28)
            .build()
            .unwrap();
        assert_eq!(settings.tools_dir(), tmp.path().join("from-config"));
        assert_eq!(settings.javac(), Some(Path::new("/cfg/javac")));
        assert_eq!(settings.min_api(), 28);
    }

    #[test]
    fn relative_project_dir_is_made_absolute() {
        let settings = SettingsBuilder::new()
            .project_dir("Hello")
            .tools_dir("tools")
            .build()
            .unwrap();
        assert!(settings.input_dir().is_absolute());
        assert_eq!(settings.project_name(), "Hello");
        assert!(settings.final_package_path().ends_with("Hello_signed.apk"));
    }
}
