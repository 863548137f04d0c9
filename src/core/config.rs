//! Project settings.
//!
//! Handles reading and validating the optional `.travis-ops.toml` at the
//! project root. Every field has a default, so a missing file is fine.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::command::Launch;
use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Settings stored in `.travis-ops.toml`
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Directory names
    pub paths: PathSettings,
    /// Execution behaviour
    pub run: RunSettings,
}

/// Directory layout, relative names only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathSettings {
    /// Taskset directory, relative to the project root
    pub taskset: String,
    /// Secrets directory, relative to the taskset directory
    pub secrets: String,
    /// Env-files directory, relative to the taskset directory
    pub env: String,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            taskset: constants::TASKSET_DIR.to_string(),
            secrets: constants::SECRETS_DIR.to_string(),
            env: constants::ENV_DIR.to_string(),
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunSettings {
    /// `wait` (default) or `detach`
    pub launch: Launch,
}

impl Settings {
    /// Path to the settings file under `root`
    pub fn config_path(root: &Path) -> PathBuf {
        root.join(constants::CONFIG_FILE)
    }

    /// Load settings from `root`, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file exists but cannot be read,
    /// `ConfigError::Parse` if it is malformed, or
    /// `ConfigError::InvalidValue` if a directory name is unusable.
    pub fn load(root: &Path) -> Result<Self> {
        let path = Self::config_path(root);
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        debug!(path = %path.display(), "loading settings");
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let settings: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;
        settings.validate()?;

        Ok(settings)
    }

    /// Check that every directory setting is a plain relative path.
    pub fn validate(&self) -> Result<()> {
        validate_dir("paths.taskset", &self.paths.taskset)?;
        validate_dir("paths.secrets", &self.paths.secrets)?;
        validate_dir("paths.env", &self.paths.env)?;
        Ok(())
    }
}

fn validate_dir(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "cannot be empty".to_string(),
        }
        .into());
    }

    let path = Path::new(value);
    if path
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("'{}' must be a relative path without '..'", value),
        }
        .into());
    }

    Ok(())
}
