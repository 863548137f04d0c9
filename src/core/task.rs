//! The CI task: merge templates, load secrets, encrypt, commit.
//!
//! ```text
//! Start -> TemplatesMerged -> SecretsLoaded -> Encrypted -> Committed
//! ```
//!
//! Each step only runs from the stage before it. A failing step leaves the
//! task where it was; earlier steps are not undone.

use std::fmt;

use tracing::{debug, info, warn};

use crate::core::assembler::Assembler;
use crate::core::command::{CommandSpec, Executor, Launch};
use crate::core::constants::travis;
use crate::core::git::Git;
use crate::core::mode::TaskMode;
use crate::core::paths::ConfigPaths;
use crate::error::{Error, Result};

/// Progress of a [`CiTask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    TemplatesMerged,
    SecretsLoaded,
    Encrypted,
    Committed,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::TemplatesMerged => "templates-merged",
            Self::SecretsLoaded => "secrets-loaded",
            Self::Encrypted => "encrypted",
            Self::Committed => "committed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the `travis encrypt` command for `lines`.
///
/// `travis encrypt <lines..> --add env.global --override --org`
pub fn encrypt_command(lines: &[String]) -> CommandSpec {
    CommandSpec::new(travis::PROGRAM)
        .with_subcommand(travis::ENCRYPT)
        .with_args(lines.iter().cloned())
        .with_kwarg(travis::ADD, travis::ENV_GLOBAL)
        .with_flags([travis::OVERRIDE, travis::ORG])
        .with_redacted_args()
}

/// One run of the travis task in a single mode.
pub struct CiTask<'a> {
    exec: &'a dyn Executor,
    assembler: Assembler,
    git: Git<'a>,
    mode: TaskMode,
    launch: Launch,
    stage: Stage,
}

impl<'a> CiTask<'a> {
    pub fn new(exec: &'a dyn Executor, paths: ConfigPaths, mode: TaskMode, launch: Launch) -> Self {
        let git = Git::new(exec, &paths.root, launch);
        Self {
            exec,
            assembler: Assembler::new(paths),
            git,
            mode,
            launch,
            stage: Stage::Start,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn expect(&self, step: &'static str, expected: Stage) -> Result<()> {
        if self.stage != expected {
            return Err(Error::StageOrder {
                step,
                expected: expected.as_str(),
                actual: self.stage.as_str(),
            });
        }
        Ok(())
    }

    /// Start -> TemplatesMerged
    pub fn merge_templates(&mut self) -> Result<()> {
        self.expect("merge", Stage::Start)?;
        self.assembler.merge_templates(self.mode)?;
        self.stage = Stage::TemplatesMerged;
        Ok(())
    }

    /// TemplatesMerged -> SecretsLoaded
    pub fn load_secrets(&mut self, secrets: &[String]) -> Result<()> {
        self.expect("load-secrets", Stage::TemplatesMerged)?;
        self.assembler.load_secrets_and_env(self.mode, secrets)?;
        self.stage = Stage::SecretsLoaded;
        Ok(())
    }

    /// SecretsLoaded -> Encrypted
    ///
    /// Runs `travis encrypt` in the task directory, where it appends the
    /// encrypted entries to the task `.travis.yml`. When waiting, the result
    /// is copied to the project root again so the commit carries it.
    pub fn encrypt(&mut self) -> Result<()> {
        self.expect("encrypt", Stage::SecretsLoaded)?;

        let paths = self.assembler.paths();
        let spec = encrypt_command(self.assembler.env_lines()).with_cwd(&paths.task);
        debug!(lines = self.assembler.env_lines().len(), "travis encrypt");
        self.exec.launch(&spec, self.launch)?;

        match self.launch {
            Launch::Wait => self.assembler.publish()?,
            Launch::Detach => warn!(
                "travis encrypt is detached; {} will not include the encrypted entries",
                paths.root_yml.display()
            ),
        }

        self.stage = Stage::Encrypted;
        Ok(())
    }

    /// Encrypted -> Committed
    pub fn commit(&mut self, message: Option<&str>) -> Result<()> {
        self.expect("commit", Stage::Encrypted)?;
        self.git.run_task(self.mode, message)?;
        self.stage = Stage::Committed;
        Ok(())
    }

    /// Run every step in order.
    pub fn run(&mut self, message: Option<&str>, secrets: &[String]) -> Result<()> {
        info!(mode = %self.mode, "running travis task");
        self.merge_templates()?;
        self.load_secrets(secrets)?;
        self.encrypt()?;
        self.commit(message)?;
        info!(mode = %self.mode, "travis task committed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::command::testing::{Kind, Recorder};
    use crate::core::config::Settings;
    use crate::core::constants;
    use crate::error::SecretError;
    use std::fs;
    use tempfile::TempDir;

    const BASE_FILE: &str = "DOCKER_HUB_PASSWORD=pw\nDOCKER_HUB_ID=octo\nGITHUB_BRANCH=main\nGITHUB_USER=jane\nBUILD_TYPE=release\n";

    fn project() -> (TempDir, ConfigPaths) {
        let tmp = TempDir::new().unwrap();
        let paths = ConfigPaths::resolve(tmp.path(), &Settings::default()).unwrap();
        fs::write(paths.fragment(constants::TRAVIS_BASE_YML), "language: python\n").unwrap();
        fs::write(paths.fragment(constants::TRAVIS_AWS_YML), "deploy:\n  provider: s3\n").unwrap();
        fs::create_dir_all(&paths.secrets).unwrap();
        fs::write(paths.secrets.join("base.env"), BASE_FILE).unwrap();
        (tmp, paths)
    }

    #[test]
    fn test_encrypt_command() {
        let spec = encrypt_command(&["A=1".to_string(), "B=2".to_string()]);
        assert_eq!(
            spec.argv(),
            vec!["travis", "encrypt", "A=1", "B=2", "--add", "env.global", "--override", "--org"]
        );
    }

    #[test]
    fn test_basic_run() {
        let (_tmp, paths) = project();
        let rec = Recorder::with_git("main", "jane");
        let mut task = CiTask::new(&rec, paths.clone(), TaskMode::Basic, Launch::Wait);

        task.run(None, &[]).unwrap();
        assert_eq!(task.stage(), Stage::Committed);

        let encrypts = rec.matching(&["travis", "encrypt"]);
        assert_eq!(encrypts.len(), 1);
        // program, subcommand, five lines, --add env.global, --override, --org
        assert_eq!(encrypts[0].argv.len(), 2 + 5 + 4);
        assert_eq!(encrypts[0].cwd.as_deref(), Some(paths.task.as_path()));
        assert_eq!(encrypts[0].kind, Kind::Run);

        let commits = rec.matching(&["git", "commit"]);
        assert_eq!(commits.len(), 1);
        assert_eq!(
            commits[0].argv,
            vec!["git", "commit", "--message", "Travis AUTO commit in MODE mode_basic"]
        );

        // encrypt happens before any git mutation
        let argvs = rec.argvs();
        let encrypt_at = argvs.iter().position(|a| a[0] == "travis").unwrap();
        let add_at = argvs.iter().position(|a| a[..2] == ["git", "add"]).unwrap();
        assert!(encrypt_at < add_at);
    }

    #[test]
    fn test_aws_missing_secret_stops_before_encrypt() {
        let (_tmp, paths) = project();
        let rec = Recorder::with_git("main", "jane");
        let mut task = CiTask::new(&rec, paths, TaskMode::Aws, Launch::Wait);

        let err = task.run(None, &["AWS_KEY_ID=abc".to_string()]).unwrap_err();
        assert!(matches!(err, Error::Secret(SecretError::Missing(k)) if k == "AWS_SECRET_KEY"));
        assert_eq!(task.stage(), Stage::TemplatesMerged);
        assert!(rec.calls().is_empty());
    }

    #[test]
    fn test_steps_cannot_be_skipped() {
        let (_tmp, paths) = project();
        let rec = Recorder::with_git("main", "jane");
        let mut task = CiTask::new(&rec, paths, TaskMode::Basic, Launch::Wait);

        let err = task.encrypt().unwrap_err();
        assert!(matches!(
            err,
            Error::StageOrder { step: "encrypt", actual: "start", .. }
        ));

        task.merge_templates().unwrap();
        assert!(task.merge_templates().is_err());
        assert!(task.commit(None).is_err());
        assert_eq!(task.stage(), Stage::TemplatesMerged);
    }

    #[test]
    fn test_encrypt_failure_halts() {
        let (_tmp, paths) = project();
        let rec = Recorder::with_git("main", "jane").fail(&["travis"], 2);
        let mut task = CiTask::new(&rec, paths, TaskMode::Basic, Launch::Wait);

        let err = task.run(Some("msg"), &[]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(task.stage(), Stage::SecretsLoaded);
        assert!(rec.matching(&["git"]).is_empty());
    }

    #[test]
    fn test_detach_spawns_encrypt() {
        let (_tmp, paths) = project();
        let rec = Recorder::with_git("main", "jane");
        let mut task = CiTask::new(&rec, paths, TaskMode::Basic, Launch::Detach);

        task.run(Some("ship"), &[]).unwrap();
        assert_eq!(rec.matching(&["travis"])[0].kind, Kind::Spawn);
        assert_eq!(rec.matching(&["git", "commit"])[0].argv[3], "ship");
    }

    #[test]
    fn test_encrypt_republishes_root_yml() {
        let (_tmp, paths) = project();
        let rec = Recorder::with_git("main", "jane");
        let mut task = CiTask::new(&rec, paths.clone(), TaskMode::Basic, Launch::Wait);

        task.merge_templates().unwrap();
        task.load_secrets(&[]).unwrap();
        // stand in for travis appending to the task file
        fs::write(&paths.task_yml, "language: python\nenv:\n  global:\n    - secure: abc\n").unwrap();
        task.encrypt().unwrap();

        let root = fs::read_to_string(&paths.root_yml).unwrap();
        assert!(root.contains("secure: abc"));
    }
}
