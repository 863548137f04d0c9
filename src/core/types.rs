//! Type aliases for domain concepts.

/// A secret key name (e.g., DOCKER_HUB_ID, AWS_KEY_ID).
///
/// Must be a valid environment variable name.
pub type SecretKey = String;

/// A single `KEY=VALUE` line handed to `travis encrypt`.
pub type EnvLine = String;
