//! Command-line interface.

pub mod completions;
pub mod context;
pub mod encrypt;
pub mod output;
pub mod paths;
pub mod task;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::command::{Launch, System};
use crate::core::travis::Travis;
use crate::error::Result;

/// travis-ops - assemble .travis.yml, encrypt secrets, commit the result.
#[derive(Parser)]
#[command(
    name = "travis-ops",
    about = "Assemble .travis.yml from templates, encrypt secrets and commit",
    version
)]
pub struct Cli {
    /// Project root (defaults to the current directory)
    #[arg(long, global = true, env = "TRAVIS_OPS_ROOT")]
    pub root: Option<PathBuf>,

    /// Launch git and travis without waiting for them to finish
    #[arg(long, global = true)]
    pub detach: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Merge base templates, encrypt base secrets, commit and push
    Basic {
        /// Commit message (defaults to "Travis AUTO commit in MODE mode_basic")
        #[arg(short, long)]
        message: Option<String>,
        /// Extra secrets as KEY=VALUE, overriding file values
        secrets: Vec<String>,
    },

    /// Like basic, plus the AWS template and AWS secrets
    Aws {
        /// Commit message (defaults to "Travis AUTO commit in MODE mode_aws")
        #[arg(short, long)]
        message: Option<String>,
        /// Extra secrets as KEY=VALUE, overriding file values
        secrets: Vec<String>,
    },

    /// Run the task in an explicit mode (mode_basic, mode_aws, mode_helm)
    Task {
        /// Task mode
        mode: String,
        /// Commit message
        #[arg(short, long)]
        message: Option<String>,
        /// Extra secrets as KEY=VALUE, overriding file values
        secrets: Vec<String>,
    },

    /// Encrypt KEY=VALUE secrets into .travis.yml without committing
    Encrypt {
        /// Secrets as KEY=VALUE
        #[arg(required = true)]
        secrets: Vec<String>,
    },

    /// Save the current branch and git user to the env directory
    Context {
        /// Only save once per reload cycle
        #[arg(long)]
        reload: bool,
        /// Start a new reload cycle first
        #[arg(long)]
        reset: bool,
    },

    /// Show the resolved file layout
    Paths {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(cli: Cli) -> Result<()> {
    use Command::*;

    let Cli {
        root,
        detach,
        command,
        ..
    } = cli;

    // completions must work outside a project, so the root is opened lazily
    let open = || -> Result<Travis<'static>> {
        let root = match root {
            Some(root) => root,
            None => std::env::current_dir()?,
        };
        Travis::open(&System, root, detach.then_some(Launch::Detach))
    };

    match command {
        Basic { message, secrets } => task::basic(&open()?, message.as_deref(), &secrets),
        Aws { message, secrets } => task::aws(&open()?, message.as_deref(), &secrets),
        Task {
            mode,
            message,
            secrets,
        } => task::execute(&open()?, &mode, message.as_deref(), &secrets),
        Encrypt { secrets } => encrypt::execute(&open()?, &secrets),
        Context { reload, reset } => context::execute(&open()?, reload, reset),
        Paths { json } => paths::execute(&open()?, json),
        Completions { shell } => completions::execute(shell),
    }
}
