//! travis-ops - assemble .travis.yml, encrypt secrets, commit the result.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use travis_ops::cli::{execute, output, Cli};
use travis_ops::core::constants::LOG_ENV;

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("travis_ops=debug")
        } else {
            EnvFilter::new("travis_ops=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli) {
        tracing::debug!(error = ?e, "task failed");
        output::error(&e.to_string());
        if let Some(hint) = e.hint() {
            output::hint(hint);
        }
        std::process::exit(e.exit_code());
    }
}
