//! CLI tests for the bundler binary.
//!
//! Only failure paths run here: a successful build needs a real SDK.

mod common;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use common::Workspace;
use predicates::prelude::*;

/// Bundler command isolated from the caller's environment and config file.
fn apk_cmd(ws: &Workspace) -> Command {
    let config = ws.root().join("apk-bundler.toml");
    std::fs::write(&config, "").unwrap();

    let mut cmd = cargo_bin_cmd!("kodegen_bundler_apk");
    cmd.env_remove("APK_TOOLS_DIR")
        .env_remove("ANDROID_JAR")
        .env_remove("APK_JAVAC")
        .env_remove("APK_MIN_API")
        .env("APK_BUNDLER_CONFIG", config);
    cmd
}

#[test]
fn help_mentions_project_dir() {
    let ws = Workspace::new();
    apk_cmd(&ws)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("PROJECT_DIR"));
}

#[test]
fn missing_project_argument_is_usage_error() {
    let ws = Workspace::new();
    apk_cmd(&ws).assert().failure().code(2);
}

#[test]
fn nonexistent_project_dir_exits_1() {
    let ws = Workspace::new();
    apk_cmd(&ws)
        .arg(ws.root().join("Nope"))
        .arg("--tools-dir")
        .arg(ws.tools())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn missing_tool_exits_1_with_hint() {
    let ws = Workspace::new();
    let empty_tools = ws.root().join("empty-tools");
    std::fs::create_dir_all(&empty_tools).unwrap();

    apk_cmd(&ws)
        .arg(ws.project())
        .arg("--tools-dir")
        .arg(&empty_tools)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("missing tool `aapt2`"))
        .stderr(predicate::str::contains("--tools-dir"));

    assert!(!ws.project().join("build").exists());
}

#[test]
fn missing_library_exits_1() {
    let ws = Workspace::new();
    common::write(&ws.project().join("library.lib"), "gone.jar\n");

    apk_cmd(&ws)
        .arg(ws.project())
        .arg("--tools-dir")
        .arg(ws.tools())
        .arg("--javac")
        .arg(ws.tools().join("javac"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("gone.jar"));
}

#[test]
fn tools_dir_from_environment() {
    let ws = Workspace::new();
    let empty_tools = ws.root().join("env-tools");
    std::fs::create_dir_all(&empty_tools).unwrap();

    apk_cmd(&ws)
        .env("APK_TOOLS_DIR", &empty_tools)
        .arg(ws.project())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("env-tools"));
}

#[test]
fn invalid_config_file_exits_1() {
    let ws = Workspace::new();
    let config = ws.root().join("bad.toml");
    std::fs::write(&config, "unknown_key = true\n").unwrap();

    apk_cmd(&ws)
        .arg(ws.project())
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid config file"));
}
