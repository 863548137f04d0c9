//! Task commands: basic, aws and task <MODE>.

use crate::cli::output;
use crate::core::command::{self, Launch};
use crate::core::constants;
use crate::core::mode::TaskMode;
use crate::core::travis::Travis;
use crate::error::Result;

/// Fail early when git or travis is not installed.
fn preflight() -> Result<()> {
    command::ensure_available(constants::git::PROGRAM)?;
    command::ensure_available(constants::travis::PROGRAM)?;
    Ok(())
}

fn report(travis: &Travis<'_>, label: &str) {
    let paths = travis.paths();
    output::success(&format!("{} task committed and pushed", label));
    output::kv("config", output::path(&paths.root_yml.display().to_string()));
    if travis.settings().run.launch == Launch::Detach {
        output::warn("git and travis were detached; check their output for failures");
    }
}

/// `travis-ops basic`
pub fn basic(travis: &Travis<'_>, message: Option<&str>, secrets: &[String]) -> Result<()> {
    preflight()?;
    travis.basic(message, secrets)?;
    report(travis, "basic");
    Ok(())
}

/// `travis-ops aws`
pub fn aws(travis: &Travis<'_>, message: Option<&str>, secrets: &[String]) -> Result<()> {
    preflight()?;
    travis.aws(message, secrets)?;
    report(travis, "aws");
    Ok(())
}

/// `travis-ops task <MODE>`
pub fn execute(
    travis: &Travis<'_>,
    mode: &str,
    message: Option<&str>,
    secrets: &[String],
) -> Result<()> {
    let mode: TaskMode = mode.parse()?;
    preflight()?;
    travis.run(mode, message, secrets)?;
    report(travis, mode.as_str());
    Ok(())
}
