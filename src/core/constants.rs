//! Constants used throughout travis-ops.
//!
//! Centralizes file names, directory names and external command vocabulary.

/// Optional project configuration file (.travis-ops.toml).
pub const CONFIG_FILE: &str = ".travis-ops.toml";

/// Default taskset directory, relative to the project root.
pub const TASKSET_DIR: &str = ".taskset";

/// Default secrets directory, relative to the taskset directory.
pub const SECRETS_DIR: &str = "secrets";

/// Default env-files directory, relative to the taskset directory.
pub const ENV_DIR: &str = "env";

/// Task name; also the task directory name under the taskset.
pub const TASK_NAME: &str = "travis";

/// Template directory name under the task directory.
pub const TEMPLATE_DIR: &str = "template";

/// Generated CI config, written in the task dir and copied to the root.
pub const TRAVIS_YML: &str = ".travis.yml";

/// Fragment included in every mode.
pub const TRAVIS_BASE_YML: &str = ".travis.base.yml";

/// Fragment included in AWS mode.
pub const TRAVIS_AWS_YML: &str = ".travis.aws.yml";

/// Marker whose presence means the GitHub context was already persisted.
pub const RELOAD_MARKER: &str = ".reloaded";

/// Env file holding the current branch.
pub const GITHUB_BRANCH_FILE: &str = "GITHUB_BRANCH";

/// Env file holding the configured git user.
pub const GITHUB_USER_FILE: &str = "GITHUB_USER";

/// Secrets required in every mode, in output order.
pub const BASE_SECRETS: &[&str] = &[
    "DOCKER_HUB_PASSWORD",
    "DOCKER_HUB_ID",
    GITHUB_BRANCH_FILE,
    GITHUB_USER_FILE,
    "BUILD_TYPE",
];

/// Secrets additionally required in AWS mode, in output order.
pub const AWS_SECRETS: &[&str] = &["AWS_KEY_ID", "AWS_SECRET_KEY"];

/// Environment variable that overrides the log filter.
pub const LOG_ENV: &str = "TRAVIS_OPS_LOG";

/// git vocabulary.
pub mod git {
    pub const PROGRAM: &str = "git";
    pub const REV_PARSE: &str = "rev-parse";
    pub const ABBREV_REF: &str = "abbrev-ref";
    pub const HEAD: &str = "HEAD";
    pub const CONFIG: &str = "config";
    pub const USER_NAME: &str = "user.name";
    pub const ADD: &str = "add";
    pub const ALL: &str = "all";
    pub const COMMIT: &str = "commit";
    pub const MESSAGE: &str = "message";
    pub const PUSH: &str = "push";
    pub const ORIGIN: &str = "origin";
}

/// travis CLI vocabulary.
pub mod travis {
    pub const PROGRAM: &str = "travis";
    pub const ENCRYPT: &str = "encrypt";
    pub const ADD: &str = "add";
    pub const ENV_GLOBAL: &str = "env.global";
    pub const OVERRIDE: &str = "override";
    pub const ORG: &str = "org";
}
