//! Commits with a literal or AI-generated message.

pub mod diff;
pub mod git;

use std::io::Write;

use tracing::info;

use crate::ai::AiService;
use crate::error::{AiError, CommitError};

pub use diff::{RepoDiffSource, StagedDiffSource, collect_staged_diff};
pub use git::{Committer, GitCommitter};

/// Arguments of `commit` as they appear after the command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitArgs {
    /// Literal message from `-m/--message`.
    pub message: Option<String>,
}

impl CommitArgs {
    /// Read the message from the remainder.
    ///
    /// The value after the first `-m` wins; `--message` is only consulted when
    /// there is no `-m`.
    pub fn parse(args: &[String]) -> Self {
        let value_after = |flag: &str| {
            args.iter()
                .position(|a| a == flag)
                .and_then(|i| args.get(i + 1))
                .cloned()
        };

        let message = value_after("-m").or_else(|| value_after("--message"));

        Self {
            message: message.filter(|m| !m.is_empty()),
        }
    }
}

/// Where the commit message comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageSource {
    Literal(String),
    Generate,
}

impl From<CommitArgs> for MessageSource {
    fn from(args: CommitArgs) -> Self {
        match args.message {
            Some(message) => MessageSource::Literal(message),
            None => MessageSource::Generate,
        }
    }
}

/// What the commit path did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed { message: String },
    DryRun { message: Option<String> },
}

/// Commit with a literal message, or generate one from the staged diff.
///
/// `make_service` is only called when a message has to be generated, and
/// before any diff is read, so configuration errors surface first. A dry run
/// reports the action and performs no external call.
pub async fn run_commit<F, W>(
    source: MessageSource,
    dry_run: bool,
    diff_source: &dyn StagedDiffSource,
    committer: &dyn Committer,
    make_service: F,
    out: &mut W,
) -> Result<CommitOutcome, CommitError>
where
    F: FnOnce() -> Result<Box<dyn AiService>, AiError>,
    W: Write,
{
    let message = match source {
        MessageSource::Literal(message) => message,
        MessageSource::Generate => {
            let mut service = make_service()?;

            if dry_run {
                report(
                    out,
                    &format!(
                        "Dry run: would generate a commit message with {} from the staged diff and commit",
                        service.vendor()
                    ),
                )?;
                return Ok(CommitOutcome::DryRun { message: None });
            }

            let diff = diff_source.staged_diff()?;
            info!("Generating commit message with {}", service.vendor());
            service.generate_commit_message(&diff).await?
        }
    };

    if dry_run {
        report(out, &format!("Dry run: would commit with message: {message}"))?;
        return Ok(CommitOutcome::DryRun {
            message: Some(message),
        });
    }

    committer.commit(&message)?;
    Ok(CommitOutcome::Committed { message })
}

fn report<W: Write>(out: &mut W, line: &str) -> Result<(), CommitError> {
    writeln!(out, "{line}").map_err(CommitError::Output)
}
