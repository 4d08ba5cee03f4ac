//! ChemIDplus
//!
//! The provider publishes a single current XML file whose root element carries a
//! `date` attribute. Only the first few hundred bytes are requested to read it.

use regex::Regex;
use tracing::debug;

use crate::remote::{check_status, http_client};
use crate::source::{RemoteFile, Source};
use crate::version::error::RemoteError;
use crate::version::filename::FileNaming;
use crate::version::scheme::{VersionScheme, parse_date};

const DEFAULT_URL: &str = "https://ftp.nlm.nih.gov/projects/chemidlease/CurrentChemID.xml";

/// Enough of the file to reach the root element's attributes
const HEADER_RANGE: &str = "bytes=0-300";

pub struct ChemIdPlusSource {
    client: reqwest::Client,
    url: String,
    /// Matches ` date="2024-02-05">` on the root element
    date_re: Regex,
}

impl ChemIdPlusSource {
    pub fn new(url: &str) -> Self {
        Self {
            client: http_client(),
            url: url.to_string(),
            date_re: Regex::new(r#" date="(\d{4}-\d{2}-\d{2})">"#).unwrap(),
        }
    }
}

impl Default for ChemIdPlusSource {
    fn default() -> Self {
        Self::new(DEFAULT_URL)
    }
}

#[async_trait::async_trait]
impl Source for ChemIdPlusSource {
    fn name(&self) -> &'static str {
        "chemidplus"
    }

    fn naming(&self) -> FileNaming {
        FileNaming::new("chemidplus", "xml", VersionScheme::Date)
    }

    async fn latest_release(&self) -> Result<RemoteFile, RemoteError> {
        debug!("Reading ChemIDplus header from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header("Range", HEADER_RANGE)
            .send()
            .await?;
        let header = check_status(response)?.text().await?;

        let version = self
            .date_re
            .captures(&header)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|date| parse_date(date).is_some())
            .ok_or_else(|| {
                RemoteError::InvalidResponse(
                    "Unable to parse ChemIDplus release date from file header".to_string(),
                )
            })?;

        Ok(RemoteFile::new(version, self.url.clone()))
    }
}
