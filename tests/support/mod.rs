//! Test support utilities for travis-ops integration tests.
//!
//! Every test gets a temporary project directory and a temporary `bin`
//! directory holding fake `git` and `travis` scripts. The scripts append
//! their arguments to `calls.log` so tests can assert on exactly what was
//! launched. The binary under test sees them first on `PATH`.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Test environment with isolated temp directories.
pub struct Test {
    /// Temporary project root
    pub dir: TempDir,
    /// Directory with the fake git and travis executables
    pub bin: TempDir,
}

impl Test {
    /// Create an empty project with fake tools installed.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let bin = TempDir::new().expect("failed to create temp bin");

        let t = Self { dir, bin };
        t.install("git", FAKE_GIT);
        t.install("travis", FAKE_TRAVIS);
        t
    }

    /// Create a project with both template fragments in place.
    pub fn with_templates() -> Self {
        let t = Self::new();
        t.write(
            ".taskset/travis/template/.travis.base.yml",
            BASE_TEMPLATE,
        );
        t.write(".taskset/travis/template/.travis.aws.yml", AWS_TEMPLATE);
        t
    }

    /// Create a project with templates and every base secret on disk.
    pub fn ready() -> Self {
        let t = Self::with_templates();
        t.write(".taskset/secrets/base.env", BASE_SECRETS_FILE);
        t
    }

    fn install(&self, name: &str, script: &str) {
        let log = self.log_path();
        let path = self.bin.path().join(name);
        fs::write(&path, script.replace("@LOG@", &log.display().to_string()))
            .expect("failed to write fake tool");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("failed to chmod fake tool");
    }

    /// Write a file relative to the project root, creating parents.
    pub fn write(&self, rel: &str, content: &str) {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        fs::write(path, content).expect("failed to write file");
    }

    /// Read a file relative to the project root.
    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel)).unwrap_or_default()
    }

    /// Absolute path of `rel` inside the project.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    fn log_path(&self) -> PathBuf {
        self.bin.path().join("calls.log")
    }

    /// Every recorded tool invocation, formatted `tool [arg] [arg]..`.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.log_path())
            .unwrap_or_default()
            .lines()
            .map(String::from)
            .collect()
    }

    /// Recorded invocations of one tool.
    pub fn calls_to(&self, tool: &str) -> Vec<String> {
        let prefix = format!("{} ", tool);
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(&prefix))
            .collect()
    }
}
