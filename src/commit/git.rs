//! Commit creation through the system `git` binary.
//!
//! Shelling out inherits the user's hooks, signing config, and editor setup.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::error::CommitError;

/// Something that can record a commit with a message.
pub trait Committer {
    fn commit(&self, message: &str) -> Result<(), CommitError>;
}

/// Runs `git commit -m <message>` with inherited stdio.
#[derive(Debug, Default)]
pub struct GitCommitter {
    workdir: Option<PathBuf>,
}

impl GitCommitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run git in a specific directory instead of the current one.
    pub fn in_dir(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: Some(workdir.into()),
        }
    }
}

impl Committer for GitCommitter {
    fn commit(&self, message: &str) -> Result<(), CommitError> {
        let mut command = Command::new("git");
        command.args(["commit", "-m", message]);
        if let Some(dir) = &self.workdir {
            command.current_dir(dir);
        }

        debug!("Running git commit ({} char message)", message.len());

        let status = command.status().map_err(CommitError::SpawnFailed)?;
        if !status.success() {
            return Err(CommitError::CommitFailed(status.code().unwrap_or(-1)));
        }

        Ok(())
    }
}
