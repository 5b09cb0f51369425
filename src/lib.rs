//! ghw - a wrapper for the GitHub CLI.
//!
//! # Overview
//!
//! ghw forwards commands to `gh` and adds a few conveniences on top:
//! `repo clone` places repositories under `<base>/<domain>/<owner>/<repo>`,
//! `commit` can ask ChatGPT or Claude for a message generated from the staged
//! diff, `--update` replaces the binary with the latest release, and
//! `--dry-run` prints what would happen without doing it.

pub mod ai;
pub mod cli;
pub mod commit;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod gh;
pub mod repo;
pub mod update;

// Re-export commonly used types
pub use ai::{AiService, Vendor};
pub use cli::Cli;
pub use config::Config;
pub use dispatch::{Route, dispatch, route};
pub use error::{AiError, CloneError, CommitError, GhError, UpdateError};
pub use gh::GhCli;
pub use repo::RepoAddress;
