//! Handle on the wrapped GitHub CLI (`gh`).

use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::error::GhError;

/// Name of the wrapped executable on the search path.
pub const GH_BINARY: &str = "gh";

/// A resolved `gh` executable.
#[derive(Debug, Clone)]
pub struct GhCli {
    path: PathBuf,
}

impl GhCli {
    /// Locate `gh` on the executable search path and verify it runs.
    ///
    /// Uses the `which` crate for cross-platform executable detection, then
    /// checks that `gh --version` exits successfully.
    pub async fn locate() -> Result<Self, GhError> {
        let path = which::which(GH_BINARY).map_err(|_| GhError::NotInstalled)?;

        let version_check = Command::new(&path)
            .arg("--version")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(GhError::SpawnFailed)?;

        if !version_check.status.success() {
            return Err(GhError::NotInstalled);
        }

        debug!("Using gh at {}", path.display());
        Ok(Self { path })
    }

    /// Use a specific executable without searching for it.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Run `gh` with inherited stdio and fail on a non-zero exit.
    pub async fn run<I, S>(&self, args: I) -> Result<(), GhError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let code = self.passthrough(&args).await?;

        if code != 0 {
            let command = args
                .iter()
                .take(2)
                .map(|a| a.as_ref().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join(" ");
            return Err(GhError::NonZeroExit { command, code });
        }

        Ok(())
    }

    /// Run `gh` with inherited stdio and return its exit code.
    ///
    /// A process killed by a signal reports exit code 1.
    pub async fn passthrough<I, S>(&self, args: I) -> Result<i32, GhError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(&self.path);
        command.args(args);
        debug!("Running {:?}", command.as_std());

        let status = command.status().await.map_err(GhError::SpawnFailed)?;
        Ok(status.code().unwrap_or(1))
    }
}

/// Render the `gh` invocation for a command and its arguments, as shown by
/// dry runs.
pub fn render_invocation(command: &str, args: &[String]) -> String {
    std::iter::once(GH_BINARY)
        .chain(std::iter::once(command))
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_invocation_joins_command_and_args() {
        let args = vec!["login".to_string()];
        assert_eq!(render_invocation("auth", &args), "gh auth login");
    }

    #[test]
    fn test_render_invocation_without_args() {
        assert_eq!(render_invocation("status", &[]), "gh status");
    }

    #[tokio::test]
    async fn test_passthrough_spawn_failure() {
        let gh = GhCli::at("/nonexistent/path/to/gh_12345");
        let result = gh.passthrough(["--version"]).await;
        assert!(matches!(result, Err(GhError::SpawnFailed(_))));
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_passthrough_returns_exit_code() {
        let gh = GhCli::at("false");
        let code = gh.passthrough(Vec::<String>::new()).await.unwrap();
        assert_eq!(code, 1);
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_run_non_zero_exit_names_command() {
        let gh = GhCli::at("false");
        let result = gh.run(["repo", "clone", "https://example.com/a/b.git"]).await;
        match result {
            Err(GhError::NonZeroExit { command, code }) => {
                assert_eq!(command, "repo clone");
                assert_eq!(code, 1);
            }
            other => panic!("Expected NonZeroExit, got {:?}", other),
        }
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_run_success() {
        let gh = GhCli::at("true");
        assert!(gh.run(["auth", "status"]).await.is_ok());
    }
}
