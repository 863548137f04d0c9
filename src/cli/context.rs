//! Context command.
//!
//! Saves the current branch and git user so they can be read back as
//! GITHUB_BRANCH and GITHUB_USER secrets.

use crate::cli::output;
use crate::core::travis::Travis;
use crate::error::Result;

pub fn execute(travis: &Travis<'_>, reload: bool, reset: bool) -> Result<()> {
    if reset && travis.reset()? {
        output::success("reload marker cleared");
    }

    let paths = travis.paths();
    if travis.context(reload)? {
        output::success("github context saved");
        output::kv("branch", output::path(&paths.branch_file.display().to_string()));
        output::kv("user", output::path(&paths.user_file.display().to_string()));
    } else {
        output::warn("github context already saved in this reload cycle");
        output::hint("run: travis-ops context --reload --reset");
    }
    Ok(())
}
