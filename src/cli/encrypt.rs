//! Encrypt command.

use crate::cli::output;
use crate::core::command;
use crate::core::constants;
use crate::core::travis::Travis;
use crate::error::Result;

/// Encrypt secrets into the task `.travis.yml`.
pub fn execute(travis: &Travis<'_>, secrets: &[String]) -> Result<()> {
    command::ensure_available(constants::travis::PROGRAM)?;
    travis.encrypt(secrets)?;
    output::success(&format!(
        "{} secret{} encrypted",
        secrets.len(),
        if secrets.len() == 1 { "" } else { "s" }
    ));
    Ok(())
}
