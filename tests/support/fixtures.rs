//! Test fixtures and constants.

/// Fake git: logs its arguments, answers branch and user queries.
///
/// `FAKE_GIT_PUSH_EXIT` sets the exit code of `git push`.
pub const FAKE_GIT: &str = r#"#!/bin/sh
{ printf 'git'; for a in "$@"; do printf ' [%s]' "$a"; done; printf '\n'; } >> "@LOG@"
case "$1" in
  rev-parse) echo "main" ;;
  config) echo "Test User" ;;
  push) exit "${FAKE_GIT_PUSH_EXIT:-0}" ;;
esac
exit 0
"#;

/// Fake travis: logs its arguments and, like `--add`, appends to the
/// `.travis.yml` in its working directory.
///
/// `FAKE_TRAVIS_EXIT` makes it fail with that code instead.
pub const FAKE_TRAVIS: &str = r#"#!/bin/sh
{ printf 'travis'; for a in "$@"; do printf ' [%s]' "$a"; done; printf '\n'; } >> "@LOG@"
if [ -n "$FAKE_TRAVIS_EXIT" ]; then
  echo "travis: encryption refused" >&2
  exit "$FAKE_TRAVIS_EXIT"
fi
printf 'env:\n  global:\n    - secure: fake-ciphertext\n' >> .travis.yml
exit 0
"#;

pub const BASE_TEMPLATE: &str = "language: python\nservices:\n  - docker\n";

pub const AWS_TEMPLATE: &str = "deploy:\n  provider: s3\n  bucket: builds\n";

/// Every base secret, as a dotenv file.
pub const BASE_SECRETS_FILE: &str = "\
DOCKER_HUB_PASSWORD=hunter2
DOCKER_HUB_ID=octo
GITHUB_BRANCH=main
GITHUB_USER=octocat
BUILD_TYPE=release
";
