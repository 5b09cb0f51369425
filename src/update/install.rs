//! Installed-binary inspection and atomic replacement.

use std::io::Write;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::UpdateError;

/// Version reported by `<path> --version`: the last whitespace-separated token
/// of its stdout.
///
/// Returns `None` if the binary cannot be run, exits non-zero, or prints
/// nothing.
pub async fn installed_version(path: &Path) -> Option<String> {
    let output = match Command::new(path)
        .arg("--version")
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .await
    {
        Ok(output) => output,
        Err(e) => {
            warn!("Could not run {} --version: {e}", path.display());
            return None;
        }
    };

    if !output.status.success() {
        return None;
    }

    String::from_utf8_lossy(&output.stdout)
        .split_whitespace()
        .last()
        .map(str::to_string)
}

/// Replace `target` with `bytes`.
///
/// The new content is written to a temporary file in the same directory and
/// renamed over the target, so the target is never observed half-written.
pub fn replace_executable(target: &Path, bytes: &[u8]) -> Result<(), UpdateError> {
    let to_error = |source| UpdateError::Replace {
        path: target.to_path_buf(),
        source,
    };

    let dir = target.parent().unwrap_or(Path::new("."));
    let mut staged = tempfile::NamedTempFile::new_in(dir).map_err(to_error)?;
    staged.write_all(bytes).map_err(to_error)?;
    staged.flush().map_err(to_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(staged.path(), std::fs::Permissions::from_mode(0o755))
            .map_err(to_error)?;
    }

    staged.persist(target).map_err(|e| to_error(e.error))?;
    debug!("Replaced {}", target.display());
    Ok(())
}
