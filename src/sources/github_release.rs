//! Sources published as assets of date-tagged GitHub releases (Mondo, HPO)

use tracing::warn;

use crate::remote::github::{DEFAULT_API_URL, DEFAULT_DOWNLOAD_URL, tag_to_date_version};
use crate::remote::GitHubClient;
use crate::source::{RemoteFile, Source, SpecificVersionSource};
use crate::version::error::RemoteError;
use crate::version::filename::FileNaming;
use crate::version::scheme::VersionScheme;

/// A release asset source
pub struct GitHubReleaseSource {
    name: &'static str,
    naming: FileNaming,
    asset: &'static str,
    /// Prepended to the date to form the release tag
    tag_prefix: &'static str,
    github: GitHubClient,
    download_base_url: String,
}

impl GitHubReleaseSource {
    /// Mondo Disease Ontology (`mondo.owl`)
    pub fn mondo() -> Self {
        Self::new(
            "mondo",
            FileNaming::new("mondo", "owl", VersionScheme::Date),
            "monarch-initiative/mondo",
            "mondo.owl",
            "v",
        )
    }

    /// Human Phenotype Ontology (`hp-full.obo`), tagged with bare dates
    pub fn hpo() -> Self {
        Self::new(
            "hpo",
            FileNaming::new("hpo", "obo", VersionScheme::Date),
            "obophenotype/human-phenotype-ontology",
            "hp-full.obo",
            "",
        )
    }

    fn new(
        name: &'static str,
        naming: FileNaming,
        repo: &str,
        asset: &'static str,
        tag_prefix: &'static str,
    ) -> Self {
        Self {
            name,
            naming,
            asset,
            tag_prefix,
            github: GitHubClient::new(DEFAULT_API_URL, repo),
            download_base_url: DEFAULT_DOWNLOAD_URL.to_string(),
        }
    }

    /// Point the API and asset download requests at different hosts
    pub fn with_base_urls(mut self, api_base_url: &str, download_base_url: &str) -> Self {
        self.github = GitHubClient::new(api_base_url, self.github.repo());
        self.download_base_url = download_base_url.to_string();
        self
    }

    fn asset_url(&self, version: &str) -> String {
        format!(
            "{}/{}/releases/download/{}{}/{}",
            self.download_base_url,
            self.github.repo(),
            self.tag_prefix,
            version,
            self.asset
        )
    }
}

#[async_trait::async_trait]
impl Source for GitHubReleaseSource {
    fn name(&self) -> &'static str {
        self.name
    }

    fn naming(&self) -> FileNaming {
        self.naming
    }

    async fn latest_release(&self) -> Result<RemoteFile, RemoteError> {
        let release = self.github.latest_release().await?;

        let version = tag_to_date_version(&release.tag_name).ok_or_else(|| {
            RemoteError::InvalidResponse(format!(
                "Release tag {} of {} is not a date",
                release.tag_name,
                self.github.repo()
            ))
        })?;

        let Some(url) = release.asset_url(self.asset) else {
            warn!(
                "Release {} of {} has no {} asset",
                release.tag_name,
                self.github.repo(),
                self.asset
            );
            return Err(RemoteError::InvalidResponse(format!(
                "Unable to find {} under release {}",
                self.asset, release.tag_name
            )));
        };

        Ok(RemoteFile::new(version, url))
    }
}

#[async_trait::async_trait]
impl SpecificVersionSource for GitHubReleaseSource {
    async fn list_versions(&self) -> Result<Vec<String>, RemoteError> {
        self.github.date_versions().await
    }

    async fn release(&self, version: &str) -> Result<RemoteFile, RemoteError> {
        Ok(RemoteFile::new(version, self.asset_url(version)))
    }
}
