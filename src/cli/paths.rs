//! Paths command.

use std::path::Path;

use crate::cli::output;
use crate::core::constants;
use crate::core::travis::Travis;
use crate::error::Result;

/// Print the resolved layout.
pub fn execute(travis: &Travis<'_>, json: bool) -> Result<()> {
    let paths = travis.paths();

    if json {
        let rendered = serde_json::to_string_pretty(&paths)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        println!("{}", rendered);
        return Ok(());
    }

    output::kv("root     ", show(&paths.root));
    output::kv("task     ", show(&paths.task));
    output::kv("base tmpl", show(&paths.fragment(constants::TRAVIS_BASE_YML)));
    output::kv("aws tmpl ", show(&paths.fragment(constants::TRAVIS_AWS_YML)));
    output::kv("output   ", show(&paths.root_yml));
    output::kv("secrets  ", show(&paths.secrets));
    output::kv("env      ", show(&paths.env));
    output::kv("launch   ", format!("{:?}", travis.settings().run.launch).to_lowercase());
    Ok(())
}

fn show(p: &Path) -> String {
    output::path(&p.display().to_string())
}
