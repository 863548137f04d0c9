//! External command construction and execution.
//!
//! [`CommandSpec`] describes one invocation declaratively (program,
//! subcommand, positional args, `--key value` options, `--flag` flags and a
//! working directory). The [`Executor`] trait is the single seam through
//! which the rest of the crate launches processes, so tests can swap in a
//! recorder while [`System`] talks to the real OS.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{CommandError, Result};

/// A declarative external command.
///
/// Every `with_*` method consumes the spec and returns the updated value,
/// so a spec that is shared must be cloned explicitly before it diverges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    subcommand: Option<String>,
    args: Vec<String>,
    options: Vec<(String, String)>,
    flags: Vec<String>,
    cwd: Option<PathBuf>,
    redact_args: bool,
}

impl CommandSpec {
    /// Start a command for `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            subcommand: None,
            args: Vec::new(),
            options: Vec::new(),
            flags: Vec::new(),
            cwd: None,
            redact_args: false,
        }
    }

    /// Set the subcommand (placed right after the program).
    pub fn with_subcommand(mut self, subcommand: impl Into<String>) -> Self {
        self.subcommand = Some(subcommand.into());
        self
    }

    /// Append positional arguments.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Add a `--key value` option. A repeated key replaces the earlier value.
    pub fn with_kwarg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.options.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.options.push((key, value)),
        }
        self
    }

    /// Add `--flag` switches. Duplicates are ignored.
    pub fn with_flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for flag in flags {
            let flag = flag.into();
            if !self.flags.contains(&flag) {
                self.flags.push(flag);
            }
        }
        self
    }

    /// Run the command in `dir` instead of the current directory.
    pub fn with_cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Mask positional arguments when the command is displayed or logged.
    pub fn with_redacted_args(mut self) -> Self {
        self.redact_args = true;
        self
    }

    pub fn subcommand(&self) -> Option<&str> {
        self.subcommand.as_deref()
    }

    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// The full argument vector, program first.
    ///
    /// Layout: `[program, subcommand?, args.., --key, value, .., --flag, ..]`.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(
            2 + self.args.len() + self.options.len() * 2 + self.flags.len(),
        );
        argv.push(self.program.clone());
        argv.extend(self.subcommand.iter().cloned());
        argv.extend(self.args.iter().cloned());
        for (key, value) in &self.options {
            argv.push(format!("--{}", key));
            argv.push(value.clone());
        }
        argv.extend(self.flags.iter().map(|flag| format!("--{}", flag)));
        argv
    }

    fn command(&self) -> Command {
        let argv = self.argv();
        let mut cmd = Command::new(&argv[0]);
        cmd.args(&argv[1..]);
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn launch_error(&self, source: std::io::Error) -> CommandError {
        CommandError::Launch {
            program: self.program.clone(),
            source,
        }
    }

    /// Run to completion and return trimmed stdout.
    ///
    /// # Errors
    ///
    /// `CommandError::Launch` if the program cannot be started,
    /// `CommandError::Failed` if it exits non-zero.
    pub fn execute(&self) -> Result<String> {
        trace!(command = %self, "execute");

        let output = self
            .command()
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.launch_error(e))?;

        if !output.status.success() {
            return Err(CommandError::Failed {
                command: self.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Run to completion with inherited stdio.
    ///
    /// # Errors
    ///
    /// Same as [`CommandSpec::execute`]; stderr is not captured.
    pub fn run(&self) -> Result<()> {
        trace!(command = %self, "run");

        let status = self
            .command()
            .status()
            .map_err(|e| self.launch_error(e))?;

        if !status.success() {
            return Err(CommandError::Failed {
                command: self.to_string(),
                code: status.code(),
                stderr: String::new(),
            }
            .into());
        }

        Ok(())
    }

    /// Launch without waiting. Only launch failures are reported.
    pub fn spawn(&self) -> Result<()> {
        trace!(command = %self, "spawn");

        let child = self.command().spawn().map_err(|e| self.launch_error(e))?;
        trace!(pid = child.id(), "spawned");

        Ok(())
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.redact_args {
            return f.write_str(&self.argv().join(" "));
        }

        let mut shown = self.clone();
        shown.args = vec!["***".to_string(); self.args.len()];
        shown.redact_args = false;
        write!(f, "{}", shown)
    }
}

/// How mutating commands (git add/commit/push, travis encrypt) are launched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Launch {
    /// Wait for the command and fail on a non-zero exit.
    #[default]
    Wait,
    /// Fire-and-forget: exit status is never observed.
    Detach,
}

/// Capability to run external commands.
pub trait Executor {
    /// Run and capture trimmed stdout.
    fn execute(&self, spec: &CommandSpec) -> Result<String>;

    /// Run to completion, inheriting stdio.
    fn run(&self, spec: &CommandSpec) -> Result<()>;

    /// Launch without waiting.
    fn spawn(&self, spec: &CommandSpec) -> Result<()>;

    /// Run or spawn according to the launch policy.
    fn launch(&self, spec: &CommandSpec, launch: Launch) -> Result<()> {
        match launch {
            Launch::Wait => self.run(spec),
            Launch::Detach => self.spawn(spec),
        }
    }
}

/// Executor backed by `std::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct System;

impl Executor for System {
    fn execute(&self, spec: &CommandSpec) -> Result<String> {
        spec.execute()
    }

    fn run(&self, spec: &CommandSpec) -> Result<()> {
        spec.run()
    }

    fn spawn(&self, spec: &CommandSpec) -> Result<()> {
        spec.spawn()
    }
}

/// Check that `program` resolves on `PATH`.
///
/// # Errors
///
/// Returns `CommandError::Launch` with `NotFound` when it does not.
pub fn ensure_available(program: &str) -> Result<()> {
    which::which(program).map_err(|e| CommandError::Launch {
        program: program.to_string(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()),
    })?;
    Ok(())
}
