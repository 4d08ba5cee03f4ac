//! HTTP access to remote data providers

pub mod download;
pub mod github;

pub use download::Downloader;
pub use github::GitHubClient;

use std::time::Duration;

use reqwest::{Response, StatusCode};
use tracing::warn;

use crate::config::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS, USER_AGENT};
use crate::version::error::RemoteError;

/// Build the HTTP client shared by remote clients and the downloader
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .read_timeout(Duration::from_secs(READ_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client")
}

/// Map non-success statuses to [`RemoteError`], passing successful responses through.
pub(crate) fn check_status(response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    let url = response.url().to_string();

    if status == StatusCode::NOT_FOUND {
        return Err(RemoteError::NotFound(url));
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        return Err(RemoteError::RateLimited {
            retry_after_secs: retry_after,
        });
    }

    if !status.is_success() {
        warn!("Remote returned status {}: {}", status, url);
        return Err(RemoteError::InvalidResponse(format!(
            "Unexpected status: {}",
            status
        )));
    }

    Ok(response)
}
