use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config;
use crate::remote::{Downloader, http_client};
use crate::source::{RemoteFile, Source, SpecificVersionSource};
use crate::version::cache::LocalCache;
use crate::version::error::{RemoteError, SourceError};

/// Options shared by every data source
#[derive(Debug, Clone, Default)]
pub struct DataSourceOptions {
    /// Root data directory; the source's files live in `<data_dir>/<source name>`.
    /// Defaults to [`config::data_dir`].
    pub data_dir: Option<PathBuf>,
    /// Don't draw download progress on the console
    pub silent: bool,
}

/// Versioned, cached access to one source's data
pub struct DataSource<S> {
    source: S,
    cache: LocalCache,
    downloader: Downloader,
}

impl<S: Source> DataSource<S> {
    pub fn new(source: S, options: DataSourceOptions) -> Self {
        let root = options.data_dir.unwrap_or_else(config::data_dir);
        let cache = LocalCache::new(source.name(), root.join(source.name()), source.naming());
        Self {
            source,
            cache,
            downloader: Downloader::new(http_client(), options.silent),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Directory this source's files are stored in
    pub fn data_dir(&self) -> &Path {
        self.cache.dir()
    }

    pub fn cache(&self) -> &LocalCache {
        &self.cache
    }

    /// Get the latest version of the data, downloading it only when needed.
    ///
    /// The provider is always asked for its latest version. Unless `force_refresh`
    /// is set, a local file at that version (or a newer one) is returned as-is.
    ///
    /// # Returns
    /// Path to the data file and its version
    pub async fn get_latest(&self, force_refresh: bool) -> Result<(PathBuf, String), SourceError> {
        let remote = self.source.latest_release().await?;
        self.check_remote_version(&remote)?;

        if !force_refresh {
            if let Some(local) = self.cache.latest()? {
                let scheme = self.cache.naming().scheme();
                if matches!(
                    scheme.compare(&local.version, &remote.version),
                    Some(Ordering::Equal | Ordering::Greater)
                ) {
                    debug!(
                        "Found existing file {:?} matching latest version {}",
                        local.path, remote.version
                    );
                    return Ok((local.path, local.version));
                }
            }
        }

        let path = self.fetch(&remote).await?;
        Ok((path, remote.version))
    }

    /// Get the most recent local file without contacting the provider.
    pub fn get_latest_local(&self) -> Result<(PathBuf, String), SourceError> {
        self.cache
            .latest()?
            .map(|entry| (entry.path, entry.version))
            .ok_or_else(|| self.no_local_data())
    }

    /// Version encoded in the name of a data file from this source.
    pub fn version_of(&self, path: &Path) -> Result<String, SourceError> {
        self.cache.naming().parse_path(path)
    }

    /// Delete all but the `keep` most recent local files.
    pub fn prune(&self, keep: usize) -> Result<Vec<PathBuf>, SourceError> {
        self.cache.prune(keep)
    }

    fn check_remote_version(&self, remote: &RemoteFile) -> Result<(), SourceError> {
        let scheme = self.cache.naming().scheme();
        if scheme.is_valid(&remote.version) {
            Ok(())
        } else {
            Err(RemoteError::InvalidResponse(format!(
                "{} reported a version that is not a valid {} version: {:?}",
                self.source.name(),
                scheme,
                remote.version
            ))
            .into())
        }
    }

    async fn fetch(&self, remote: &RemoteFile) -> Result<PathBuf, SourceError> {
        let path = self.cache.path_for(&remote.version);
        info!(
            "Downloading {} version {} to {:?}",
            self.source.name(),
            remote.version,
            path
        );
        self.downloader.download(&remote.url, &path).await?;
        Ok(path)
    }

    fn no_local_data(&self) -> SourceError {
        SourceError::NoLocalData {
            source_name: self.source.name().to_string(),
            dir: self.cache.dir().to_path_buf(),
        }
    }
}

impl<S: SpecificVersionSource> DataSource<S> {
    /// Versions available from the provider, newest first
    pub async fn list_versions(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.source.list_versions().await?)
    }

    /// Get one specific version, downloading it unless already cached.
    pub async fn get_specific(
        &self,
        version: &str,
        force_refresh: bool,
    ) -> Result<PathBuf, SourceError> {
        // find() also rejects versions that are malformed under the scheme
        let cached = self.cache.find(version)?;
        if !force_refresh {
            if let Some(entry) = cached {
                debug!("Found existing file {:?} for version {}", entry.path, version);
                return Ok(entry.path);
            }
        }

        let remote = self.source.release(version).await?;
        self.check_remote_version(&remote)?;
        self.fetch(&remote).await
    }

    /// Get one specific version from the local cache only.
    pub fn get_specific_local(&self, version: &str) -> Result<PathBuf, SourceError> {
        self.cache
            .find(version)?
            .map(|entry| entry.path)
            .ok_or_else(|| self.no_local_data())
    }
}
