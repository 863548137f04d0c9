//! Input validation for secrets passed on the command line.

use crate::core::types::SecretKey;
use crate::error::{Result, SecretError};

/// Validate a secret key name.
///
/// Secret keys must be valid environment variable names:
/// - Only A-Z, a-z, 0-9, and underscore
/// - Cannot start with a digit
/// - Cannot be empty
///
/// # Errors
///
/// Returns `SecretError::Invalid` if the key is invalid.
pub fn validate_key(key: &str) -> Result<()> {
    let invalid = |reason: String| SecretError::Invalid {
        entry: key.to_string(),
        reason,
    };

    if key.is_empty() {
        return Err(invalid("key cannot be empty".to_string()).into());
    }

    if key.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(invalid("key cannot start with a digit".to_string()).into());
    }

    if let Some((i, ch)) = key
        .chars()
        .enumerate()
        .find(|(_, ch)| !ch.is_ascii_alphanumeric() && *ch != '_')
    {
        return Err(invalid(format!(
            "invalid character '{}' at position {}. Only letters, digits, and underscore are allowed",
            ch,
            i + 1
        ))
        .into());
    }

    Ok(())
}

/// Split a `KEY=VALUE` string at the first `=`.
///
/// The value may itself contain `=`; it may not be missing.
///
/// # Errors
///
/// Returns `SecretError::Invalid` if there is no `=` or the key is invalid.
pub fn parse_assignment(entry: &str) -> Result<(SecretKey, String)> {
    let Some((key, value)) = entry.split_once('=') else {
        return Err(SecretError::Invalid {
            entry: redact(entry),
            reason: "expected KEY=VALUE".to_string(),
        }
        .into());
    };

    let key = key.trim();
    validate_key(key)?;

    Ok((key.to_string(), value.to_string()))
}

// Keep the first few characters only; the entry may be a bare secret.
fn redact(entry: &str) -> String {
    let prefix: String = entry.chars().take(4).collect();
    if prefix.len() < entry.len() {
        format!("{}…", prefix)
    } else {
        prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_valid_keys() {
        assert!(validate_key("AWS_KEY_ID").is_ok());
        assert!(validate_key("_PRIVATE").is_ok());
        assert!(validate_key("build_type2").is_ok());
    }

    #[test]
    fn test_invalid_keys() {
        assert!(validate_key("").is_err());
        assert!(validate_key("1KEY").is_err());
        assert!(validate_key("MY-KEY").is_err());
        assert!(validate_key("MY KEY").is_err());
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("AWS_KEY_ID=abc").unwrap(),
            ("AWS_KEY_ID".to_string(), "abc".to_string())
        );
        assert_eq!(
            parse_assignment("TOKEN=a=b==").unwrap(),
            ("TOKEN".to_string(), "a=b==".to_string())
        );
        assert_eq!(
            parse_assignment("EMPTY=").unwrap(),
            ("EMPTY".to_string(), String::new())
        );
    }

    #[test]
    fn test_parse_assignment_without_equals() {
        let err = parse_assignment("supersecretvalue").unwrap_err();
        match err {
            Error::Secret(SecretError::Invalid { entry, .. }) => {
                assert_eq!(entry, "supe…");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_assignment_bad_key() {
        assert!(parse_assignment("=value").is_err());
        assert!(parse_assignment("BAD-KEY=value").is_err());
    }
}
