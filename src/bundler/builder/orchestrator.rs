//! Main bundler orchestration and coordination.
//!
//! This module provides the [`Bundler`] orchestrator that walks a project
//! through the ten build stages and produces the signed APK.

use super::{
    checksum::calculate_sha256,
    state::{BuildState, Stage},
    tool_detection::ToolSet,
};
use crate::bundler::{
    error::{Context, Error, ErrorExt, Result},
    platform::android::{self, BuildContext},
    settings::{LibraryManifest, Settings},
    utils::process::{ProcessRunner, ToolRunner},
};
use serde::Serialize;
use std::path::PathBuf;

/// The signed APK produced by a successful build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundledArtifact {
    /// Location of the signed APK.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// Hex-encoded SHA-256 of the APK.
    pub checksum: String,
}

/// Main bundler orchestrator.
///
/// Construction resolves the tool set and reads `library.lib`, so a
/// `Bundler` only exists for a project whose tools are all present. Stages
/// then run strictly one after another; the first failure moves the build to
/// [`BuildState::Aborted`] and every later call to [`Bundler::advance`] is
/// refused. The build directory is never cleaned up after a failure.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_apk::bundler::{Bundler, SettingsBuilder};
///
/// # async fn example() -> kodegen_bundler_apk::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_dir("apps/Hello")
///     .tools_dir("/opt/android-tools")
///     .build()?;
///
/// let mut bundler = Bundler::new(settings)?;
/// let artifact = bundler.bundle().await?;
/// println!("Created: {} ({} bytes)", artifact.path.display(), artifact.size);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler<R: ToolRunner = ProcessRunner> {
    settings: Settings,
    tools: ToolSet,
    libraries: LibraryManifest,
    runner: R,
    state: BuildState,
    aligned_checksum: Option<String>,
}

impl Bundler<ProcessRunner> {
    /// Creates a bundler that runs the real Android build tools.
    pub fn new(settings: Settings) -> Result<Self> {
        Self::with_runner(settings, ProcessRunner)
    }
}

impl<R: ToolRunner> Bundler<R> {
    /// Creates a bundler that runs tools through `runner`.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingTool`] / [`Error::ToolNotFound`] from tool resolution
    /// - [`Error::MissingLibrary`] from `library.lib`
    pub fn with_runner(settings: Settings, runner: R) -> Result<Self> {
        log::info!("Preparing build for {}", settings.input_dir().display());

        let tools = ToolSet::resolve(&settings)?;
        let libraries = LibraryManifest::read(&settings.library_manifest_path())?;

        log::debug!(
            "{} -> {} ({} libraries)",
            BuildState::Uninitialized,
            BuildState::Validated,
            libraries.len()
        );

        Ok(Self {
            settings,
            tools,
            libraries,
            runner,
            state: BuildState::Validated,
            aligned_checksum: None,
        })
    }

    pub fn state(&self) -> BuildState {
        self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tools(&self) -> &ToolSet {
        &self.tools
    }

    pub fn libraries(&self) -> &LibraryManifest {
        &self.libraries
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Runs every remaining stage and returns the signed APK.
    pub async fn bundle(&mut self) -> Result<BundledArtifact> {
        while self.state != BuildState::Signed {
            self.advance().await?;
        }

        let path = self.settings.final_package_path();
        let size = tokio::fs::metadata(&path)
            .await
            .fs_context("reading artifact metadata", &path)?
            .len();
        let checksum = calculate_sha256(&path).await?;

        log::info!("✓ Created signed APK: {}", path.display());

        Ok(BundledArtifact {
            path,
            size,
            checksum,
        })
    }

    /// Runs the next stage and returns the state it leads to.
    ///
    /// # Errors
    ///
    /// The stage's error wrapped in [`Error::StageFailed`]; the bundler is then
    /// [`BuildState::Aborted`]. Calling this in a terminal state returns
    /// [`Error::PipelineHalted`].
    pub async fn advance(&mut self) -> Result<BuildState> {
        let Some(stage) = self.state.next_stage() else {
            return Err(Error::PipelineHalted {
                state: self.state.to_string(),
            });
        };

        log::info!(
            "=== [{}/{}] {} ===",
            stage.number(),
            Stage::ALL.len(),
            stage.label()
        );

        match self.run_stage(stage).await {
            Ok(()) => {
                self.transition(stage.completes());
                Ok(self.state)
            }
            Err(e) => {
                log::error!("{} failed: {}", stage.label(), e);
                self.transition(BuildState::Aborted);
                Err(Error::StageFailed {
                    stage: stage.label(),
                    source: Box::new(e),
                })
            }
        }
    }

    async fn run_stage(&mut self, stage: Stage) -> Result<()> {
        let ctx = BuildContext {
            settings: &self.settings,
            tools: &self.tools,
            libraries: &self.libraries,
            runner: &self.runner,
        };

        match stage {
            Stage::Clean => android::clean::clean(&ctx).await,
            Stage::CompileResources => android::resources::compile(&ctx).await,
            Stage::LinkResources => android::resources::link(&ctx).await,
            Stage::CompileSources => android::java::compile(&ctx).await,
            Stage::ArchiveClasses => android::jar::archive_classes(&ctx).await.map(drop),
            Stage::GenerateDex => android::dex::generate(&ctx).await.map(drop),
            Stage::MergeDex => android::dex::merge(&ctx).await.map(drop),
            Stage::InjectAssets => android::assets::inject(&ctx).await.map(drop),
            Stage::Align => {
                let checksum = android::zipalign::align(&ctx).await?;
                self.aligned_checksum = Some(checksum);
                Ok(())
            }
            Stage::Sign => {
                let expected = self
                    .aligned_checksum
                    .as_deref()
                    .context("signing requested before the package was aligned")?;
                android::apksigner::sign(&ctx, expected).await
            }
        }
    }

    fn transition(&mut self, next: BuildState) {
        log::debug!("{} -> {}", self.state, next);
        self.state = next;
    }
}
