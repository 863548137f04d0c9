//! Entry points for the travis task.
//!
//! [`Travis`] binds an executor, a project root and its settings, and
//! exposes one method per user-facing operation.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::assembler::Assembler;
use crate::core::command::{Executor, Launch};
use crate::core::config::Settings;
use crate::core::git::Git;
use crate::core::mode::TaskMode;
use crate::core::paths::ConfigPaths;
use crate::core::task::{encrypt_command, CiTask};
use crate::core::validation;
use crate::error::Result;

pub struct Travis<'a> {
    exec: &'a dyn Executor,
    root: PathBuf,
    settings: Settings,
}

impl<'a> Travis<'a> {
    /// Load settings from `root`. `launch` overrides the configured policy.
    pub fn open(exec: &'a dyn Executor, root: impl AsRef<Path>, launch: Option<Launch>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let mut settings = Settings::load(&root)?;
        if let Some(launch) = launch {
            settings.run.launch = launch;
        }
        debug!(root = %root.display(), launch = ?settings.run.launch, "travis opened");

        Ok(Self {
            exec,
            root,
            settings,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Layout for this project, without creating anything.
    pub fn paths(&self) -> ConfigPaths {
        ConfigPaths::new(&self.root, &self.settings)
    }

    fn git(&self) -> Git<'a> {
        Git::new(self.exec, &self.root, self.settings.run.launch)
    }

    /// Run the full task in basic mode.
    pub fn basic(&self, message: Option<&str>, secrets: &[String]) -> Result<()> {
        info!("travis basic");
        self.run(TaskMode::Basic, message, secrets)
    }

    /// Run the full task in AWS mode.
    pub fn aws(&self, message: Option<&str>, secrets: &[String]) -> Result<()> {
        info!("travis aws");
        self.run(TaskMode::Aws, message, secrets)
    }

    /// Run the full task in the mode named by `mode`.
    ///
    /// # Errors
    ///
    /// `Error::InvalidTaskMode` if `mode` is not a known mode.
    pub fn task(&self, mode: &str, message: Option<&str>, secrets: &[String]) -> Result<()> {
        let mode: TaskMode = mode.parse()?;
        info!(mode = %mode, "travis task");
        self.run(mode, message, secrets)
    }

    /// Run the full task in an already parsed `mode`.
    pub fn run(&self, mode: TaskMode, message: Option<&str>, secrets: &[String]) -> Result<()> {
        let paths = ConfigPaths::resolve(&self.root, &self.settings)?;
        CiTask::new(self.exec, paths, mode, self.settings.run.launch).run(message, secrets)
    }

    /// Encrypt `secrets` into the task `.travis.yml` without merging or
    /// committing.
    pub fn encrypt(&self, secrets: &[String]) -> Result<()> {
        info!(count = secrets.len(), "travis encrypt");
        for entry in secrets {
            validation::parse_assignment(entry)?;
        }

        let paths = ConfigPaths::resolve(&self.root, &self.settings)?;
        let spec = encrypt_command(secrets).with_cwd(&paths.task);
        self.exec.launch(&spec, self.settings.run.launch)?;

        if self.settings.run.launch == Launch::Wait && paths.task_yml.is_file() {
            Assembler::new(paths).publish()?;
        }
        Ok(())
    }

    /// Save the branch and git user for later secret loads.
    ///
    /// With `reload`, this happens at most once per reload cycle. Returns
    /// whether the files were written.
    pub fn context(&self, reload: bool) -> Result<bool> {
        info!(reload, "travis context");
        let assembler = Assembler::new(ConfigPaths::resolve(&self.root, &self.settings)?);
        let git = self.git();

        if reload {
            assembler.prepare(true, &git)
        } else {
            assembler.persist_github_context(&git)?;
            Ok(true)
        }
    }

    /// Start a new reload cycle. Returns whether a marker was removed.
    pub fn reset(&self) -> Result<bool> {
        Assembler::new(self.paths()).clear_marker()
    }
}
