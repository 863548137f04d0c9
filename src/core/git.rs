//! git operations.
//!
//! Queries (branch, user) always block and propagate failures. Mutating
//! operations go through the configured [`Launch`] policy.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::command::{CommandSpec, Executor, Launch};
use crate::core::constants::git;
use crate::core::mode::TaskMode;
use crate::error::Result;

/// git driven through an [`Executor`].
pub struct Git<'a> {
    exec: &'a dyn Executor,
    repo: PathBuf,
    launch: Launch,
}

impl<'a> Git<'a> {
    /// git in `repo`, launching mutating commands per `launch`.
    pub fn new(exec: &'a dyn Executor, repo: impl AsRef<Path>, launch: Launch) -> Self {
        Self {
            exec,
            repo: repo.as_ref().to_path_buf(),
            launch,
        }
    }

    fn cmd(&self, subcommand: &str) -> CommandSpec {
        CommandSpec::new(git::PROGRAM)
            .with_subcommand(subcommand)
            .with_cwd(&self.repo)
    }

    /// Current branch name (`git rev-parse --abbrev-ref HEAD`).
    pub fn current_branch(&self) -> Result<String> {
        debug!("git current_branch");
        let spec = self.cmd(git::REV_PARSE).with_kwarg(git::ABBREV_REF, git::HEAD);
        self.exec.execute(&spec)
    }

    /// Configured user name (`git config user.name`).
    pub fn user_name(&self) -> Result<String> {
        debug!("git user_name");
        let spec = self.cmd(git::CONFIG).with_args([git::USER_NAME]);
        self.exec.execute(&spec)
    }

    /// `git add --all`
    pub fn stage_all(&self) -> Result<()> {
        debug!("git stage_all");
        let spec = self.cmd(git::ADD).with_flags([git::ALL]);
        self.exec.launch(&spec, self.launch)
    }

    /// `git commit --message <message>`
    pub fn commit(&self, message: &str) -> Result<()> {
        debug!(commit_message = message, "git commit");
        let spec = self.cmd(git::COMMIT).with_kwarg(git::MESSAGE, message);
        self.exec.launch(&spec, self.launch)
    }

    /// `git push origin <current branch>`
    pub fn push_to_origin(&self) -> Result<()> {
        let branch = self.current_branch()?;
        debug!(branch = %branch, "git push_to_origin");
        let spec = self.cmd(git::PUSH).with_args([git::ORIGIN, branch.as_str()]);
        self.exec.launch(&spec, self.launch)
    }

    /// Stage everything, commit and push.
    ///
    /// An empty or absent message becomes `Travis AUTO commit in MODE <mode>`.
    /// Nothing is undone when a later step fails.
    pub fn run_task(&self, mode: TaskMode, message: Option<&str>) -> Result<()> {
        let message = commit_message(mode, message);
        debug!(mode = %mode, commit_message = %message, "git run_task");

        if self.launch == Launch::Detach {
            warn!("git commands are detached; their failures will not be reported");
        }

        self.stage_all()?;
        self.commit(&message)?;
        self.push_to_origin()
    }
}

/// The commit message for `mode`, synthesized when none is given.
pub fn commit_message(mode: TaskMode, message: Option<&str>) -> String {
    match message.map(str::trim) {
        Some(msg) if !msg.is_empty() => msg.to_string(),
        _ => format!("Travis AUTO commit in MODE {}", mode),
    }
}
