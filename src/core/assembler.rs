//! Config assembly: template merging, secret collection and GitHub context.
//!
//! One [`Assembler`] lives for one invocation. It owns the resolved
//! [`ConfigPaths`] and accumulates the fragments it merged and the env lines
//! it selected; only the files it writes outlive it.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::core::env;
use crate::core::git::Git;
use crate::core::mode::TaskMode;
use crate::core::paths::ConfigPaths;
use crate::core::types::EnvLine;
use crate::core::validation;
use crate::error::{ConfigError, Result, SecretError};

/// Builds `.travis.yml` and the env lines to encrypt.
#[derive(Debug)]
pub struct Assembler {
    paths: ConfigPaths,
    templates_used: Vec<PathBuf>,
    env_lines: Vec<EnvLine>,
}

impl Assembler {
    pub fn new(paths: ConfigPaths) -> Self {
        Self {
            paths,
            templates_used: Vec::new(),
            env_lines: Vec::new(),
        }
    }

    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    /// Fragments written by the last merge, in merge order.
    pub fn templates_used(&self) -> &[PathBuf] {
        &self.templates_used
    }

    /// `KEY=VALUE` lines selected by the last secret load.
    pub fn env_lines(&self) -> &[EnvLine] {
        &self.env_lines
    }

    /// Concatenate the mode's fragments into the task `.travis.yml` and copy
    /// it to the project root.
    ///
    /// Fragments are appended as-is; no YAML-level merge happens, so keys
    /// repeated across fragments are left for the CI to resolve.
    ///
    /// # Errors
    ///
    /// `ConfigError::MissingTemplate` if a fragment does not exist,
    /// `ConfigError::InvalidTemplate` if one does not parse as YAML.
    pub fn merge_templates(&mut self, mode: TaskMode) -> Result<()> {
        debug!(mode = %mode, "merging templates");

        let mut merged = String::new();
        let mut used = Vec::new();

        for name in mode.fragments() {
            let path = self.paths.fragment(name);
            let content = read_fragment(&path)?;

            merged.push_str(&content);
            if !merged.is_empty() && !merged.ends_with('\n') {
                merged.push('\n');
            }
            used.push(path);
        }

        std::fs::write(&self.paths.task_yml, merged)?;
        self.templates_used = used;
        self.publish()?;

        info!(
            fragments = self.templates_used.len(),
            output = %self.paths.root_yml.display(),
            "templates merged"
        );
        Ok(())
    }

    /// Copy the task `.travis.yml` to the project root.
    pub fn publish(&self) -> Result<()> {
        std::fs::copy(&self.paths.task_yml, &self.paths.root_yml)?;
        Ok(())
    }

    /// Collect the secrets `mode` requires into env lines.
    ///
    /// Sources, later overriding earlier: files in the secrets directory,
    /// files in the env directory, then `custom` `KEY=VALUE` strings in
    /// argument order.
    ///
    /// # Errors
    ///
    /// `SecretError::Missing` for the first required key found in no source,
    /// `SecretError::Invalid` for a malformed custom string.
    pub fn load_secrets_and_env(&mut self, mode: TaskMode, custom: &[String]) -> Result<()> {
        debug!(mode = %mode, custom = custom.len(), "loading secrets");

        let mut all = env::read_dir(&self.paths.secrets)?;
        all.extend(env::read_dir(&self.paths.env)?);
        for entry in custom {
            let (key, value) = validation::parse_assignment(entry)?;
            all.insert(key, Zeroizing::new(value));
        }

        let mut selected = Vec::new();
        for key in mode.required_secrets() {
            let value = all
                .get(key)
                .ok_or_else(|| SecretError::Missing(key.to_string()))?;
            selected.push((key, value.as_str()));
        }

        self.env_lines = env::to_env_lines(selected);
        debug!(lines = self.env_lines.len(), "secrets selected");
        Ok(())
    }

    /// Record the current branch and git user in the env directory.
    pub fn persist_github_context(&self, git: &Git<'_>) -> Result<()> {
        debug!("persisting github context");

        let branch = git.current_branch()?;
        let user = git.user_name()?;

        std::fs::create_dir_all(&self.paths.env)?;
        std::fs::write(&self.paths.branch_file, format!("{}\n", branch))?;
        std::fs::write(&self.paths.user_file, format!("{}\n", user))?;

        info!(branch = %branch, "github context saved");
        Ok(())
    }

    /// Whether the GitHub context was already persisted in this cycle.
    pub fn is_already_applied(&self) -> bool {
        self.paths.marker.exists()
    }

    /// Persist the GitHub context once per reload cycle.
    ///
    /// Does nothing unless `reload` is set. Returns whether files were written.
    pub fn prepare(&self, reload: bool, git: &Git<'_>) -> Result<bool> {
        if !reload {
            return Ok(false);
        }
        if self.is_already_applied() {
            debug!(marker = %self.paths.marker.display(), "already applied, skipping");
            return Ok(false);
        }

        self.persist_github_context(git)?;
        std::fs::write(
            &self.paths.marker,
            format!("{}\n", chrono::Utc::now().to_rfc3339()),
        )?;
        Ok(true)
    }

    /// Remove the reload marker. Returns whether one existed.
    pub fn clear_marker(&self) -> Result<bool> {
        match std::fs::remove_file(&self.paths.marker) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

fn read_fragment(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(ConfigError::MissingTemplate(path.to_path_buf()).into());
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if !content.trim().is_empty() {
        serde_yml::from_str::<serde_yml::Value>(&content).map_err(|e| {
            ConfigError::InvalidTemplate {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;
    }

    Ok(content)
}
