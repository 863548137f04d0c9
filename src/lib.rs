//! travis-ops - assemble `.travis.yml`, encrypt secrets, commit the result.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── task          # basic / aws / task runs
//! │   ├── encrypt       # Encrypt secrets only
//! │   ├── context       # Persist branch and git user
//! │   ├── paths         # Show the resolved layout
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── command       # CommandSpec builder and Executor trait
//!     ├── git           # git queries and add/commit/push
//!     ├── config        # .travis-ops.toml settings
//!     ├── paths         # Resolved task layout
//!     ├── env           # Env and secret file reading
//!     ├── assembler     # Template merge, secret selection, context files
//!     ├── task          # CiTask state machine
//!     └── travis        # Entry points
//! ```
//!
//! # Flow
//!
//! ```text
//! merge templates -> load secrets -> travis encrypt -> git add/commit/push
//! ```

pub mod cli;
pub mod core;
pub mod error;
