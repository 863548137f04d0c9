//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a travis-ops command running in the project directory with the
    /// fake tools first on PATH.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("travis-ops").expect("failed to find travis-ops binary");
        let path = format!(
            "{}:{}",
            self.bin.path().display(),
            std::env::var("PATH").unwrap_or_default()
        );
        cmd.env("PATH", path);
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("TRAVIS_OPS_LOG");
        cmd.env_remove("TRAVIS_OPS_ROOT");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `travis-ops basic`.
    pub fn basic(&self, args: &[&str]) -> Output {
        self.cmd()
            .arg("basic")
            .args(args)
            .output()
            .expect("failed to run travis-ops basic")
    }

    /// Shortcut for `travis-ops aws`.
    pub fn aws(&self, args: &[&str]) -> Output {
        self.cmd()
            .arg("aws")
            .args(args)
            .output()
            .expect("failed to run travis-ops aws")
    }

    /// Shortcut for `travis-ops encrypt`.
    pub fn encrypt(&self, secrets: &[&str]) -> Output {
        self.cmd()
            .arg("encrypt")
            .args(secrets)
            .output()
            .expect("failed to run travis-ops encrypt")
    }

    /// Shortcut for `travis-ops context`.
    pub fn context(&self, args: &[&str]) -> Output {
        self.cmd()
            .arg("context")
            .args(args)
            .output()
            .expect("failed to run travis-ops context")
    }
}
