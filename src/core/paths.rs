//! Resolved filesystem layout for one task.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::core::config::Settings;
use crate::core::constants;
use crate::error::Result;

/// Every path the travis task reads or writes.
///
/// Resolved once from the project root; directories the task writes into
/// are created by [`ConfigPaths::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigPaths {
    pub root: PathBuf,
    pub taskset: PathBuf,
    pub task: PathBuf,
    pub templates: PathBuf,
    pub task_yml: PathBuf,
    pub root_yml: PathBuf,
    pub secrets: PathBuf,
    pub env: PathBuf,
    pub branch_file: PathBuf,
    pub user_file: PathBuf,
    pub marker: PathBuf,
}

impl ConfigPaths {
    /// Compute the layout without touching the filesystem.
    pub fn new(root: impl AsRef<Path>, settings: &Settings) -> Self {
        let root = root.as_ref().to_path_buf();
        let taskset = root.join(&settings.paths.taskset);
        let task = taskset.join(constants::TASK_NAME);
        let env = taskset.join(&settings.paths.env);

        Self {
            templates: task.join(constants::TEMPLATE_DIR),
            task_yml: task.join(constants::TRAVIS_YML),
            root_yml: root.join(constants::TRAVIS_YML),
            secrets: taskset.join(&settings.paths.secrets),
            branch_file: env.join(constants::GITHUB_BRANCH_FILE),
            user_file: env.join(constants::GITHUB_USER_FILE),
            marker: task.join(constants::RELOAD_MARKER),
            root,
            taskset,
            task,
            env,
        }
    }

    /// Compute the layout and create the task and template directories.
    ///
    /// # Errors
    ///
    /// Returns error if a directory cannot be created.
    pub fn resolve(root: impl AsRef<Path>, settings: &Settings) -> Result<Self> {
        let paths = Self::new(root, settings);
        debug!(task = %paths.task.display(), "creating task directories");
        std::fs::create_dir_all(&paths.task)?;
        std::fs::create_dir_all(&paths.templates)?;
        Ok(paths)
    }

    /// Path of a template fragment.
    pub fn fragment(&self, name: &str) -> PathBuf {
        self.templates.join(name)
    }
}
