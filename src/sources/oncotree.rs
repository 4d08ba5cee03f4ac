//! OncoTree

use serde::Deserialize;
use tracing::debug;

use crate::remote::{check_status, http_client};
use crate::source::{RemoteFile, Source};
use crate::version::error::RemoteError;
use crate::version::filename::FileNaming;
use crate::version::scheme::{VersionScheme, parse_date};

const DEFAULT_BASE_URL: &str = "https://oncotree.info";

/// API identifier of the current stable release
const LATEST_STABLE: &str = "oncotree_latest_stable";

/// Entry from the OncoTree versions API
#[derive(Debug, Deserialize)]
struct OncoTreeVersion {
    api_identifier: String,
    release_date: String,
}

pub struct OncoTreeSource {
    client: reqwest::Client,
    base_url: String,
}

impl OncoTreeSource {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: http_client(),
            base_url: base_url.to_string(),
        }
    }
}

impl Default for OncoTreeSource {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl Source for OncoTreeSource {
    fn name(&self) -> &'static str {
        "oncotree"
    }

    fn naming(&self) -> FileNaming {
        FileNaming::new("oncotree", "json", VersionScheme::Date)
    }

    async fn latest_release(&self) -> Result<RemoteFile, RemoteError> {
        let url = format!("{}/api/versions", self.base_url);
        debug!("Fetching OncoTree versions: {}", url);

        let response = check_status(self.client.get(&url).send().await?)?;
        let versions: Vec<OncoTreeVersion> = response
            .json()
            .await
            .map_err(|e| RemoteError::InvalidResponse(e.to_string()))?;

        let stable = versions
            .into_iter()
            .find(|v| v.api_identifier == LATEST_STABLE)
            .ok_or_else(|| {
                RemoteError::InvalidResponse(
                    "Unable to locate latest stable OncoTree version".to_string(),
                )
            })?;

        if parse_date(&stable.release_date).is_none() {
            return Err(RemoteError::InvalidResponse(format!(
                "Unexpected OncoTree release date: {}",
                stable.release_date
            )));
        }

        Ok(RemoteFile::new(
            stable.release_date,
            format!(
                "{}/api/tumorTypes/tree?version={}",
                self.base_url, LATEST_STABLE
            ),
        ))
    }
}
