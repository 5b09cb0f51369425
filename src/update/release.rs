//! GitHub release lookup.

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::UpdateError;

/// GitHub release information
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// GitHub release asset
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Asset {
    pub name: String,
    pub browser_download_url: String,
}

impl Release {
    /// Find the asset with an exact name.
    pub fn asset(&self, name: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.name == name)
    }
}

/// Fetch the latest published release of `repo` (`owner/name`).
pub async fn fetch_latest(client: &Client, api_base: &str, repo: &str) -> Result<Release, UpdateError> {
    let url = format!("{}/repos/{}/releases/latest", api_base.trim_end_matches('/'), repo);
    debug!("Fetching latest release from {url}");

    let response = client
        .get(&url)
        .header("Accept", "application/vnd.github.v3+json")
        .send()
        .await
        .map_err(UpdateError::FetchRelease)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(UpdateError::Api {
            status: status.as_u16(),
            body,
        });
    }

    response.json().await.map_err(UpdateError::FetchRelease)
}

/// Download an asset's bytes.
pub async fn download(client: &Client, url: &str) -> Result<Vec<u8>, UpdateError> {
    let to_error = |source| UpdateError::Download {
        url: url.to_string(),
        source,
    };

    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(to_error)?;

    let bytes = response.bytes().await.map_err(to_error)?;
    Ok(bytes.to_vec())
}
