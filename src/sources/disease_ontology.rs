//! Human Disease Ontology
//!
//! Releases carry no OWL asset; the file is read from the repository tree at the
//! release tag.

use crate::remote::GitHubClient;
use crate::remote::github::DEFAULT_API_URL;
use crate::source::{RemoteFile, Source, SpecificVersionSource};
use crate::version::error::RemoteError;
use crate::version::filename::FileNaming;
use crate::version::scheme::VersionScheme;

const REPO: &str = "DiseaseOntology/HumanDiseaseOntology";

/// Default base URL for raw repository content
const DEFAULT_RAW_URL: &str = "https://raw.githubusercontent.com";

/// Path of the ontology inside the repository
const OWL_PATH: &str = "src/ontology/doid.owl";

pub struct DiseaseOntologySource {
    github: GitHubClient,
    raw_base_url: String,
}

impl DiseaseOntologySource {
    pub fn new(api_base_url: &str, raw_base_url: &str) -> Self {
        Self {
            github: GitHubClient::new(api_base_url, REPO),
            raw_base_url: raw_base_url.to_string(),
        }
    }

    fn owl_url(&self, version: &str) -> String {
        format!("{}/{}/v{}/{}", self.raw_base_url, REPO, version, OWL_PATH)
    }
}

impl Default for DiseaseOntologySource {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, DEFAULT_RAW_URL)
    }
}

#[async_trait::async_trait]
impl Source for DiseaseOntologySource {
    fn name(&self) -> &'static str {
        "do"
    }

    fn naming(&self) -> FileNaming {
        FileNaming::new("do", "owl", VersionScheme::Date)
    }

    async fn latest_release(&self) -> Result<RemoteFile, RemoteError> {
        let latest = self
            .list_versions()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                RemoteError::InvalidResponse(format!("No date-tagged releases found for {}", REPO))
            })?;
        self.release(&latest).await
    }
}

#[async_trait::async_trait]
impl SpecificVersionSource for DiseaseOntologySource {
    async fn list_versions(&self) -> Result<Vec<String>, RemoteError> {
        self.github.date_versions().await
    }

    async fn release(&self, version: &str) -> Result<RemoteFile, RemoteError> {
        let url = self.owl_url(version);
        Ok(RemoteFile::new(version, url))
    }
}
