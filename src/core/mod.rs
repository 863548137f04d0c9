//! Core library components.
//!
//! Command construction, git operations, config assembly and the CI task
//! state machine. Nothing in here prints; the CLI layer owns the terminal.

pub mod assembler;
pub mod command;
pub mod config;
pub mod constants;
pub mod env;
pub mod git;
pub mod mode;
pub mod paths;
pub mod task;
pub mod travis;
pub mod types;
pub mod validation;
