//! Stage 1: reset the build directory.

use super::BuildContext;
use crate::bundler::{error::Result, utils::fs};

/// Remove `build/` with everything in it and recreate it empty.
///
/// Artifacts of a previous run never leak into this one, so two runs over
/// the same input leave the same set of artifact names behind.
pub async fn clean<R>(ctx: &BuildContext<'_, R>) -> Result<()> {
    let build_dir = ctx.settings.build_dir();
    log::info!("Cleaning {}", build_dir.display());
    fs::create_dir_all(&build_dir, true).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::platform::android::testing::{Fixture, Recorder, write};

    #[tokio::test]
    async fn removes_stale_artifacts() {
        let fx = Fixture::new();
        let runner = Recorder::succeeding();
        let stale = fx.settings.build_dir().join("classes/Old.class");
        write(&stale, "stale");

        clean(&fx.ctx(&runner)).await.unwrap();

        assert!(fx.settings.build_dir().is_dir());
        assert!(!stale.exists());
        assert_eq!(std::fs::read_dir(fx.settings.build_dir()).unwrap().count(), 0);
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn creates_missing_build_dir() {
        let fx = Fixture::new();
        std::fs::remove_dir_all(fx.settings.build_dir()).unwrap();

        clean(&fx.ctx(&Recorder::succeeding())).await.unwrap();

        assert!(fx.settings.build_dir().is_dir());
    }
}
