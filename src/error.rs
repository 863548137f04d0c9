//! Error types for travis-ops.
//!
//! Errors are grouped by the concern that raises them and folded into a
//! single [`Error`] so every operation can return the crate [`Result`].

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid task mode: '{0}' (expected mode_basic, mode_aws or mode_helm)")]
    InvalidTaskMode(String),

    #[error("step '{step}' called in stage {actual}, expected {expected}")]
    StageOrder {
        step: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures launching or running external programs.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The program ran and exited non-zero.
    #[error("`{command}` failed ({}){}", exit_label(.code), stderr_suffix(.stderr))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The program could not be started at all.
    #[error("failed to launch `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Secret collection failures.
#[derive(Error, Debug)]
pub enum SecretError {
    #[error("missing required secret: {0}")]
    Missing(String),

    #[error("invalid secret '{entry}': {reason}")]
    Invalid { entry: String, reason: String },
}

/// Configuration and template failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("template not found: {}", .0.display())]
    MissingTemplate(PathBuf),

    #[error("template {} is not valid YAML: {reason}", .path.display())]
    InvalidTemplate { path: PathBuf, reason: String },
}

impl Error {
    /// Process exit code for this error.
    ///
    /// A failed external command hands its own exit code through; anything
    /// else maps to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Command(CommandError::Failed {
                code: Some(code), ..
            }) if *code != 0 => *code,
            _ => 1,
        }
    }

    /// A short suggestion for the user, if one applies.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Error::Command(CommandError::Launch { .. }) => {
                Some("make sure git and the travis CLI are installed and on PATH")
            }
            Error::Secret(SecretError::Missing(_)) => {
                Some("add it to a file in the secrets or env directory, or pass KEY=VALUE")
            }
            Error::Config(ConfigError::MissingTemplate(_)) => {
                Some("run: travis-ops paths  (to see where templates are expected)")
            }
            _ => None,
        }
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
