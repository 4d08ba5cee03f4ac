//! Data source abstraction and the caching facade built on it
//!
//! A [`Source`] only knows how to ask its provider for the latest release. The
//! [`DataSource`] facade combines it with the local cache and the downloader.

mod facade;

pub use facade::{DataSource, DataSourceOptions};

#[cfg(test)]
use mockall::automock;

use crate::version::error::RemoteError;
use crate::version::filename::FileNaming;

/// A downloadable release of a source's data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    /// Version identifier, valid under the source's scheme
    pub version: String,
    /// Where the data file for this version can be fetched from
    pub url: String,
}

impl RemoteFile {
    pub fn new(version: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            url: url.into(),
        }
    }
}

/// Trait for asking a remote data provider about its releases
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Source: Send + Sync {
    /// Source name, also used as the cache subdirectory (e.g. "mondo")
    fn name(&self) -> &'static str;

    /// How this source's cached files are named and versioned
    fn naming(&self) -> FileNaming;

    /// Asks the provider for its latest release
    ///
    /// # Returns
    /// * `Ok(RemoteFile)` - Latest version and the URL of its data file
    /// * `Err(RemoteError)` - If the provider is unreachable or answers unexpectedly
    async fn latest_release(&self) -> Result<RemoteFile, RemoteError>;
}

/// Sources that can also list and fetch older releases
#[async_trait::async_trait]
pub trait SpecificVersionSource: Source {
    /// Versions available remotely, newest first
    async fn list_versions(&self) -> Result<Vec<String>, RemoteError>;

    /// Locate the data file of one specific version
    async fn release(&self, version: &str) -> Result<RemoteFile, RemoteError>;
}

#[async_trait::async_trait]
impl<T: Source + ?Sized> Source for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn naming(&self) -> FileNaming {
        (**self).naming()
    }

    async fn latest_release(&self) -> Result<RemoteFile, RemoteError> {
        (**self).latest_release().await
    }
}
