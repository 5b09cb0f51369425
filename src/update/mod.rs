//! Self-update from the latest GitHub release.

pub mod install;
pub mod release;

use std::io::Write;
use std::path::PathBuf;

use reqwest::Client;
use tracing::info;

use crate::error::UpdateError;

pub use install::{installed_version, replace_executable};
pub use release::{Asset, Release};

/// Repository that publishes ghw releases.
pub const RELEASE_REPO: &str = "dotbrains/ghw";

/// Name of the release asset holding the binary.
pub const ASSET_NAME: &str = "ghw";

const GITHUB_API: &str = "https://api.github.com";

/// What a self-update did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    UpToDate,
    Updated { version: String },
}

/// Replaces an installed executable with the latest release asset.
#[derive(Debug)]
pub struct Updater {
    client: Client,
    api_base: String,
    repo: String,
    executable: PathBuf,
}

impl Updater {
    pub fn new(executable: impl Into<PathBuf>) -> Result<Self, UpdateError> {
        let client = Client::builder()
            .user_agent(format!("ghw/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(UpdateError::Client)?;

        Ok(Self {
            client,
            api_base: GITHUB_API.to_string(),
            repo: RELEASE_REPO.to_string(),
            executable: executable.into(),
        })
    }

    /// Update the executable of the running process.
    pub fn for_current_exe() -> Result<Self, UpdateError> {
        let exe = std::env::current_exe().map_err(UpdateError::CurrentExe)?;
        Self::new(exe)
    }

    /// Query a different API host (GitHub Enterprise, tests).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub async fn latest_release(&self) -> Result<Release, UpdateError> {
        release::fetch_latest(&self.client, &self.api_base, &self.repo).await
    }

    /// Download and install the latest release unless it is already installed.
    ///
    /// The installed version is compared to the release tag as plain strings.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<UpdateOutcome, UpdateError> {
        let latest = self.latest_release().await?;
        let installed = installed_version(&self.executable).await;

        if installed.as_deref() == Some(latest.tag_name.as_str()) {
            writeln!(out, "CLI is already up to date.").map_err(UpdateError::Output)?;
            return Ok(UpdateOutcome::UpToDate);
        }

        let asset = latest.asset(ASSET_NAME).ok_or_else(|| UpdateError::AssetNotFound {
            tag: latest.tag_name.clone(),
            asset: ASSET_NAME.to_string(),
        })?;

        writeln!(
            out,
            "Downloading the latest release from {}",
            asset.browser_download_url
        )
        .map_err(UpdateError::Output)?;
        let bytes = release::download(&self.client, &asset.browser_download_url).await?;

        info!(
            "Installing {} ({} bytes) over {}",
            latest.tag_name,
            bytes.len(),
            self.executable.display()
        );
        replace_executable(&self.executable, &bytes)?;

        writeln!(out, "CLI has been updated to version {}.", latest.tag_name)
            .map_err(UpdateError::Output)?;
        Ok(UpdateOutcome::Updated {
            version: latest.tag_name,
        })
    }
}
