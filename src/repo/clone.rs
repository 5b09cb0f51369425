//! Structured clones into `<base>/<domain>/<owner>/<repo>`.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{Config, DEFAULT_BASE_DIR};
use crate::error::CloneError;
use crate::gh::GhCli;

use super::address::RepoAddress;

/// Arguments of `repo clone` as they appear after the `repo` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneArgs {
    pub address: RepoAddress,
    /// `-d/--dir` given after `repo clone`.
    pub dir: Option<PathBuf>,
}

impl CloneArgs {
    /// Parse `clone <domain/owner/repo> [-d <dir>]`.
    ///
    /// The first non-flag argument after `clone` is the address. Other flags
    /// are ignored.
    pub fn parse(args: &[String]) -> Result<Self, CloneError> {
        let mut rest = args.iter().skip_while(|a| *a != "clone").skip(1);
        let mut address = None;
        let mut dir = None;

        while let Some(arg) = rest.next() {
            match arg.as_str() {
                "-d" | "--dir" => dir = rest.next().map(PathBuf::from),
                flag if flag.starts_with('-') => {}
                value if address.is_none() => address = Some(value),
                _ => {}
            }
        }

        let address = address.ok_or(CloneError::MissingAddress)?;

        Ok(Self {
            address: RepoAddress::parse(address)?,
            dir,
        })
    }
}

/// Pick the base directory for a clone.
///
/// `GHW_BASE_DIR` always wins; then `-d/--dir` after `repo clone`; then the
/// top-level `--dir`; then `~/gh`. A leading `~` is expanded.
pub fn resolve_base_dir(
    config: &Config,
    clone_dir: Option<&Path>,
    cli_dir: Option<&Path>,
) -> PathBuf {
    let chosen = config
        .base_dir_override
        .as_deref()
        .or(clone_dir)
        .or(cli_dir)
        .unwrap_or(Path::new(DEFAULT_BASE_DIR));

    config.expand_home(chosen)
}

/// Create `<base>/<domain>/<owner>/<repo>`, including parents.
///
/// Succeeds if the directory already exists.
pub fn prepare_target_dir(base_dir: &Path, address: &RepoAddress) -> Result<PathBuf, CloneError> {
    let target = base_dir.join(address.relative_path());

    std::fs::create_dir_all(&target).map_err(|source| CloneError::CreateDir {
        path: target.clone(),
        source,
    })?;

    Ok(target)
}

/// Clone a repository into its structured directory under `base_dir`.
///
/// The base directory must already exist. The transfer itself is delegated
/// to `gh repo clone`.
pub async fn clone_repository(
    gh: &GhCli,
    address: &RepoAddress,
    base_dir: &Path,
) -> Result<PathBuf, CloneError> {
    if !base_dir.is_dir() {
        return Err(CloneError::BaseDirNotFound(base_dir.to_path_buf()));
    }

    let target = prepare_target_dir(base_dir, address)?;
    let url = address.clone_url();

    info!("Cloning {} into {}", url, target.display());

    gh.run([
        OsStr::new("repo"),
        OsStr::new("clone"),
        OsStr::new(&url),
        target.as_os_str(),
    ])
    .await?;

    Ok(target)
}
