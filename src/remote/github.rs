//! GitHub Releases API client

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::remote::{check_status, http_client};
use crate::version::error::RemoteError;
use crate::version::scheme::{normalize_version, parse_date};

/// Default base URL for GitHub API
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default base URL for release asset downloads
pub const DEFAULT_DOWNLOAD_URL: &str = "https://github.com";

/// Release entry from GitHub Releases API
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRelease {
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<GitHubAsset>,
}

/// Downloadable file attached to a release
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubAsset {
    pub name: String,
    pub browser_download_url: String,
}

impl GitHubRelease {
    /// Download URL of the asset with the given file name
    pub fn asset_url(&self, asset_name: &str) -> Option<&str> {
        self.assets
            .iter()
            .find(|asset| asset.name == asset_name)
            .map(|asset| asset.browser_download_url.as_str())
    }
}

/// Convert a date-like release tag (`v2023-09-12` or `2023-09-12`) into a date version.
pub fn tag_to_date_version(tag: &str) -> Option<String> {
    let date = normalize_version(tag);
    parse_date(date).map(|_| date.to_string())
}

/// Client for one repository's releases
pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
    repo: String,
}

impl GitHubClient {
    /// Creates a new GitHubClient with a custom base URL
    pub fn new(base_url: &str, repo: &str) -> Self {
        Self {
            client: http_client(),
            base_url: base_url.to_string(),
            repo: repo.to_string(),
        }
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Fetch the release GitHub marks as latest
    pub async fn latest_release(&self) -> Result<GitHubRelease, RemoteError> {
        let url = format!("{}/repos/{}/releases/latest", self.base_url, self.repo);
        self.get_json(&url).await
    }

    /// Fetch one page of releases, newest first
    pub async fn releases(&self) -> Result<Vec<GitHubRelease>, RemoteError> {
        let url = format!("{}/repos/{}/releases", self.base_url, self.repo);
        self.get_json(&url).await
    }

    /// Fetch releases and keep those tagged with a date, newest first
    pub async fn date_versions(&self) -> Result<Vec<String>, RemoteError> {
        let versions = self
            .releases()
            .await?
            .into_iter()
            .filter_map(|release| {
                let version = tag_to_date_version(&release.tag_name);
                if version.is_none() {
                    debug!(
                        "Ignoring non-date release tag {} in {}",
                        release.tag_name, self.repo
                    );
                }
                version
            })
            .collect();
        Ok(versions)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RemoteError> {
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;

        let response = check_status(response)?;

        response
            .json()
            .await
            .map_err(|e| RemoteError::InvalidResponse(e.to_string()))
    }
}
