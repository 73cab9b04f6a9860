//! Shared fixtures for the pipeline integration tests.
//!
//! [`FakeRunner`] stands in for the Android SDK: every tool call writes the
//! files the real tool would leave behind, so the whole pipeline runs without
//! an SDK or a JDK installed.

#![allow(dead_code)]

use kodegen_bundler_apk::bundler::{
    Result, Settings, SettingsBuilder, ToolInvocation, ToolOutput, ToolRunner,
    builder::tool_detection,
};
use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tempfile::TempDir;
use zip::{ZipWriter, write::SimpleFileOptions};

/// Simulated SDK that records every invocation.
#[derive(Debug, Default)]
pub struct FakeRunner {
    calls: Mutex<Vec<ToolInvocation>>,
    fail_tool: Option<&'static str>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call to `tool` exits with status 1.
    pub fn failing(tool: &'static str) -> Self {
        Self {
            fail_tool: Some(tool),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<ToolInvocation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn tools_called(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.tool).collect()
    }

    pub fn call(&self, tool: &str) -> ToolInvocation {
        self.calls()
            .into_iter()
            .find(|c| c.tool == tool)
            .unwrap_or_else(|| panic!("{tool} was never invoked"))
    }

    fn simulate(invocation: &ToolInvocation) {
        let path_after = |flag: &str| PathBuf::from(invocation.value_of(flag).unwrap());
        let last = |n: usize| PathBuf::from(&invocation.args[invocation.args.len() - n]);

        match invocation.tool.as_str() {
            "aapt2" if invocation.args[0] == "compile" => {
                write(&path_after("-o"), "compiled resources");
            }
            "aapt2" => {
                write_zip(
                    &path_after("-o"),
                    &[
                        ("AndroidManifest.xml", "<manifest/>"),
                        ("resources.arsc", "arsc"),
                    ],
                );
                write(
                    &path_after("--java").join("com/example/R.java"),
                    "package com.example; public final class R {}",
                );
            }
            "javac" => {
                let classes = path_after("-d");
                write(&classes.join("com/example/Main.class"), "\u{ca}\u{fe}");
                write(&classes.join("com/example/R.class"), "\u{ca}\u{fe}");
            }
            "d8" => {
                write(&path_after("--output").join("classes.dex"), "dex\n035");
            }
            "zipalign" => {
                std::fs::copy(last(2), last(1)).unwrap();
            }
            "apksigner" => {
                std::fs::copy(last(1), path_after("--out")).unwrap();
            }
            other => panic!("unexpected tool {other}"),
        }
    }
}

impl ToolRunner for FakeRunner {
    async fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput> {
        self.calls.lock().unwrap().push(invocation.clone());
        if self.fail_tool == Some(invocation.tool.as_str()) {
            return Ok(ToolOutput::failed(1, format!("{} exploded", invocation.tool)));
        }
        Self::simulate(invocation);
        Ok(ToolOutput::ok())
    }
}

/// A temp directory holding `Hello/` (a minimal valid project) and `tools/`.
pub struct Workspace {
    pub tmp: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let ws = Self { tmp };

        write(
            &ws.project().join("AndroidManifest.xml"),
            r#"<manifest package="com.example"><application/></manifest>"#,
        );
        write(
            &ws.project().join("res/values/strings.xml"),
            r#"<resources><string name="app_name">Hello</string></resources>"#,
        );
        write(
            &ws.project().join("java/com/example/Main.java"),
            "package com.example; public class Main {}",
        );

        for name in [
            tool_detection::AAPT2,
            tool_detection::D8,
            tool_detection::ZIPALIGN,
            tool_detection::APKSIGNER,
            tool_detection::KEYSTORE,
            "android.jar",
            "javac",
        ] {
            write(&ws.tools().join(name), "");
        }
        ws
    }

    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    pub fn project(&self) -> PathBuf {
        self.root().join("Hello")
    }

    pub fn tools(&self) -> PathBuf {
        self.root().join("tools")
    }

    pub fn settings(&self) -> Settings {
        SettingsBuilder::new()
            .project_dir(self.project())
            .tools_dir(self.tools())
            .javac(self.tools().join("javac"))
            .build()
            .unwrap()
    }

    /// Relative paths of every file under `build/`, sorted.
    pub fn build_artifacts(&self) -> Vec<String> {
        let build = self.project().join("build");
        let mut names: Vec<String> = walkdir::WalkDir::new(&build)
            .into_iter()
            .map(|e| e.unwrap())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                e.path()
                    .strip_prefix(&build)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        names.sort();
        names
    }
}

pub fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

pub fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut zip = ZipWriter::new(File::create(path).unwrap());
    for (name, content) in entries {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}
