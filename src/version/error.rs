use std::path::PathBuf;

use thiserror::Error;

use crate::version::scheme::VersionScheme;

/// Errors talking to a remote data provider
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Rate limited: retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors surfaced by a data source facade
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No local {source_name} data found in {}", .dir.display())]
    NoLocalData { source_name: String, dir: PathBuf },

    #[error("Not a recognized cache file: {}", .0.display())]
    CorruptCacheEntry(PathBuf),

    #[error("Invalid {scheme} version: {version:?}")]
    InvalidVersion {
        version: String,
        scheme: VersionScheme,
    },

    #[error("Incomplete download from {url}: expected {expected} bytes, received {received}")]
    DownloadIncomplete {
        url: String,
        expected: u64,
        received: u64,
    },
}
