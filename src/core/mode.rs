//! Task modes.
//!
//! A mode selects which template fragments are merged and which secrets
//! are required.

use std::fmt;
use std::str::FromStr;

use crate::core::constants;
use crate::error::Error;

/// Selects the fragments and secret set for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskMode {
    Basic,
    Aws,
    /// Reserved. Behaves like `Basic`.
    Helm,
}

impl TaskMode {
    /// All modes, in declaration order.
    pub const ALL: [TaskMode; 3] = [TaskMode::Basic, TaskMode::Aws, TaskMode::Helm];

    /// Identifier used on the command line and in commit messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "mode_basic",
            Self::Aws => "mode_aws",
            Self::Helm => "mode_helm",
        }
    }

    /// Template fragment file names merged for this mode, in merge order.
    pub fn fragments(&self) -> Vec<&'static str> {
        let mut fragments = vec![constants::TRAVIS_BASE_YML];
        if *self == Self::Aws {
            fragments.push(constants::TRAVIS_AWS_YML);
        }
        fragments
    }

    /// Secret keys required for this mode, in output order.
    pub fn required_secrets(&self) -> Vec<&'static str> {
        let mut keys = constants::BASE_SECRETS.to_vec();
        if *self == Self::Aws {
            keys.extend_from_slice(constants::AWS_SECRETS);
        }
        keys
    }
}

impl fmt::Display for TaskMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s.trim())
            .ok_or_else(|| Error::InvalidTaskMode(s.to_string()))
    }
}
