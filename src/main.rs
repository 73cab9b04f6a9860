//! Kodegen Bundler APK - Android package bundler.
//!
//! This binary builds a signed APK from an Android project directory and
//! prints its path. Exit code 0 guarantees the APK exists.

use kodegen_bundler_apk::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging; RUST_LOG overrides the default level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            for suggestion in e.recovery_suggestions() {
                eprintln!("  hint: {}", suggestion);
            }
            1
        }
    };

    process::exit(exit_code);
}
