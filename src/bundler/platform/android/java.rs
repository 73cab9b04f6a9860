//! Stage 4: compile application sources with `javac`.

use super::BuildContext;
use crate::bundler::{
    error::{Error, Result},
    settings::{JAVA_LANGUAGE_LEVEL, JAVA_SOURCE_ENCODING},
    utils::{fs, process::ToolRunner},
};
use std::ffi::OsString;

/// Compile `java/**/*.java` plus the generated `R` sources into `build/classes/`.
///
/// The classpath is the platform archive, the generated sources directory,
/// then every library in `library.lib` order. Sources are targeted at Java 8
/// bytecode, which is what `d8` accepts without desugaring surprises.
///
/// # Errors
///
/// [`Error::NoSourceFiles`] when `java/` is absent or holds no `.java` file.
pub async fn compile<R: ToolRunner>(ctx: &BuildContext<'_, R>) -> Result<()> {
    let source_dir = ctx.settings.source_dir();
    let sources = fs::collect_files_with_extension(&source_dir, "java")?;
    if sources.is_empty() {
        return Err(Error::NoSourceFiles { path: source_dir });
    }
    let generated = fs::collect_files_with_extension(&ctx.settings.generated_sources_dir(), "java")?;

    log::info!(
        "Compiling {} source files ({} generated)",
        sources.len(),
        generated.len()
    );

    let classes_dir = ctx.settings.classes_dir();
    fs::create_dir_all(&classes_dir, false).await?;

    let invocation = ctx
        .invocation("javac", ctx.tools.javac())
        .arg("-encoding")
        .arg(JAVA_SOURCE_ENCODING)
        .arg("-source")
        .arg(JAVA_LANGUAGE_LEVEL)
        .arg("-target")
        .arg(JAVA_LANGUAGE_LEVEL)
        .arg("-Xlint:-options")
        .arg("-classpath")
        .arg(classpath(ctx)?)
        .arg("-d")
        .arg(&classes_dir)
        .args(generated)
        .args(sources);
    ctx.run(invocation).await?;

    Ok(())
}

/// Platform archive, generated sources, then libraries, joined with the
/// host path separator.
fn classpath<R>(ctx: &BuildContext<'_, R>) -> Result<OsString> {
    let mut entries = vec![
        ctx.tools.platform_archive().to_path_buf(),
        ctx.settings.generated_sources_dir(),
    ];
    entries.extend(ctx.libraries.archives().iter().cloned());
    std::env::join_paths(entries)
        .map_err(|e| Error::GenericError(format!("cannot build javac classpath: {e}")))
}
