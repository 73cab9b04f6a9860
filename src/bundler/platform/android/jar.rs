//! Stage 5: pack compiled classes into `classes.jar`.

use super::BuildContext;
use crate::bundler::{
    error::{Error, Result},
    utils::archive::{blocking, create_class_archive},
};

/// Archive the class tree under `build/classes/` and return the number of
/// files packed.
///
/// An empty class tree is an error: `javac` succeeded but produced nothing
/// for `d8` to translate.
pub async fn archive_classes<R>(ctx: &BuildContext<'_, R>) -> Result<usize> {
    let classes_dir = ctx.settings.classes_dir();
    let archive = ctx.settings.classes_archive_path();
    log::info!("Archiving {} into {}", classes_dir.display(), archive.display());

    let count = {
        let (classes_dir, archive) = (classes_dir.clone(), archive.clone());
        blocking(move || create_class_archive(&classes_dir, &archive)).await?
    };
    if count == 0 {
        return Err(Error::GenericError(format!(
            "no compiled classes found in {}",
            classes_dir.display()
        )));
    }

    log::debug!("Packed {count} files into {}", archive.display());
    Ok(count)
}
