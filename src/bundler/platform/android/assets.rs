//! Stage 8: copy `assets/` into `base.apk`.

use super::BuildContext;
use crate::bundler::{
    error::Result,
    utils::archive::{PackageUpdate, blocking, entry_name},
};
use walkdir::WalkDir;

/// Add every file under `assets/` to the package as `assets/<relative path>`,
/// with `/` separators on every host. Entries are stored uncompressed.
///
/// A project without `assets/` is fine; nothing happens and `0` is returned.
pub async fn inject<R>(ctx: &BuildContext<'_, R>) -> Result<usize> {
    let assets_dir = ctx.settings.assets_dir();
    if !assets_dir.is_dir() {
        log::info!("No assets directory, skipping");
        return Ok(0);
    }

    let package = ctx.settings.base_package_path();
    let added = blocking(move || {
        let mut update = PackageUpdate::open(&package)?;
        for entry in WalkDir::new(&assets_dir).follow_links(true).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(&assets_dir)?;
            update.append_file(&entry_name("assets", relative), entry.path())?;
        }
        update.finish()
    })
    .await?;

    for name in &added {
        log::info!("Added asset: {name}");
    }
    Ok(added.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{
        platform::android::testing::{Fixture, Recorder, write, write_package},
        utils::archive::entry_names,
    };

    #[tokio::test]
    async fn nested_assets_keep_relative_paths() {
        let fx = Fixture::new();
        write_package(&fx.settings.base_package_path());
        let assets = fx.settings.assets_dir();
        write(&assets.join("sub/dir/file.bin"), "bin");
        write(&assets.join("top.txt"), "txt");

        let count = inject(&fx.ctx(&Recorder::succeeding())).await.unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            entry_names(&fx.settings.base_package_path()).unwrap(),
            vec!["AndroidManifest.xml", "assets/sub/dir/file.bin", "assets/top.txt"]
        );
    }

    #[tokio::test]
    async fn missing_assets_dir_is_noop() {
        let fx = Fixture::new();
        write_package(&fx.settings.base_package_path());
        let before = std::fs::read(fx.settings.base_package_path()).unwrap();

        let count = inject(&fx.ctx(&Recorder::succeeding())).await.unwrap();

        assert_eq!(count, 0);
        assert_eq!(std::fs::read(fx.settings.base_package_path()).unwrap(), before);
    }

    #[tokio::test]
    async fn empty_assets_dir_adds_nothing() {
        let fx = Fixture::new();
        write_package(&fx.settings.base_package_path());
        std::fs::create_dir_all(fx.settings.assets_dir().join("empty")).unwrap();

        let count = inject(&fx.ctx(&Recorder::succeeding())).await.unwrap();

        assert_eq!(count, 0);
        assert_eq!(
            entry_names(&fx.settings.base_package_path()).unwrap(),
            vec!["AndroidManifest.xml"]
        );
    }
}
