//! Env and secret file reading.
//!
//! A directory of files is flattened into one key/value mapping. Files hold
//! either dotenv-style `KEY=VALUE` lines or, for single-value files such as
//! `GITHUB_BRANCH`, just the value with the file name as key.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::core::types::{EnvLine, SecretKey};
use crate::core::validation::validate_key;
use crate::error::{ConfigError, Result};

/// Secret values, wiped from memory on drop.
pub type SecretMap = BTreeMap<SecretKey, Zeroizing<String>>;

/// Read every regular, non-hidden file in `dir`, in file-name order.
///
/// Later files override earlier ones on key collision. A missing directory
/// yields an empty mapping.
///
/// # Errors
///
/// Returns `ConfigError::Read` if the directory or a file cannot be read.
pub fn read_dir(dir: &Path) -> Result<SecretMap> {
    let mut map = SecretMap::new();

    if !dir.is_dir() {
        debug!(dir = %dir.display(), "env directory missing, skipping");
        return Ok(map);
    }

    let read_err = |source| ConfigError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if !hidden && entry.path().is_file() {
            files.push(entry.path());
        }
    }
    files.sort();

    for path in files {
        let entries = read_file(&path)?;
        trace!(file = %path.display(), keys = entries.len(), "read env file");
        map.extend(entries);
    }

    debug!(dir = %dir.display(), keys = map.len(), "read env directory");
    Ok(map)
}

/// Read one env file.
///
/// # Errors
///
/// Returns `ConfigError::Read` if the file cannot be read.
pub fn read_file(path: &Path) -> Result<Vec<(SecretKey, Zeroizing<String>)>> {
    let contents = Zeroizing::new(std::fs::read_to_string(path).map_err(|source| {
        ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }
    })?);

    let lines: Vec<&str> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    // Single-value file: the name is the key. A file named like a variable
    // (`GITHUB_BRANCH`) keeps the whole line, `=` included, unless the line
    // assigns that same key.
    if let [line] = lines.as_slice() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let keyed =
            validate_key(&name).is_ok() && !name.chars().any(|c| c.is_ascii_lowercase());
        let assigns_self = keyed
            && line
                .strip_prefix(name.as_str())
                .is_some_and(|rest| rest.trim_start().starts_with('='));

        if (keyed && !assigns_self) || !line.contains('=') {
            return Ok(vec![(name, Zeroizing::new(parse_value(line)))]);
        }
    }

    Ok(lines
        .into_iter()
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let key = key.trim();
            let key = key.strip_prefix("export ").unwrap_or(key).trim();
            (key.to_string(), Zeroizing::new(parse_value(value.trim())))
        })
        .filter(|(key, _)| !key.is_empty())
        .collect())
}

/// Format pairs as `KEY=VALUE` lines, preserving order.
pub fn to_env_lines<'a, I>(pairs: I) -> Vec<EnvLine>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect()
}

fn parse_value(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return unescape_double_quoted(&raw[1..raw.len() - 1]);
    }

    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        return raw[1..raw.len() - 1].to_string();
    }

    raw.to_string()
}

fn unescape_double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
