//! Streaming file download into the cache
//!
//! Bytes are written to a hidden temporary file next to the destination and only
//! renamed into place once the body has been fully received, so an interrupted
//! download never looks like a cache entry.

use std::io::{self, Write};
use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::remote::check_status;
use crate::version::error::{RemoteError, SourceError};

const PROGRESS_TEMPLATE: &str =
    "{msg} [{bar:40}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";

/// Downloads remote files to local paths
pub struct Downloader {
    client: reqwest::Client,
    silent: bool,
}

impl Downloader {
    pub fn new(client: reqwest::Client, silent: bool) -> Self {
        Self { client, silent }
    }

    /// Download `url` to `destination`, returning the number of bytes written.
    ///
    /// The parent directory is created if needed. On any failure the destination
    /// is left untouched.
    pub async fn download(&self, url: &str, destination: &Path) -> Result<u64, SourceError> {
        let (dir, file_name) = match (destination.parent(), destination.file_name()) {
            (Some(dir), Some(file_name)) => (dir, file_name.to_string_lossy().into_owned()),
            _ => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Not a file path: {:?}", destination),
                )
                .into());
            }
        };
        std::fs::create_dir_all(dir)?;

        debug!("Requesting {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(RemoteError::from)?;
        let mut response = check_status(response)?;

        let expected = response.content_length();
        let mut part = tempfile::Builder::new()
            .prefix(&format!(".{}.", file_name))
            .suffix(".part")
            .tempfile_in(dir)?;

        let progress = self.progress_bar(expected, &file_name);
        let mut received: u64 = 0;

        loop {
            let chunk = match response.chunk().await {
                Ok(Some(chunk)) => chunk,
                Ok(None) => break,
                // Headers were received, so a failing body means the transfer was cut short
                Err(e) if e.is_body() || e.is_decode() => {
                    progress.abandon();
                    warn!("Download from {} stopped after {} bytes: {}", url, received, e);
                    return Err(SourceError::DownloadIncomplete {
                        url: url.to_string(),
                        expected: expected.unwrap_or(received),
                        received,
                    });
                }
                Err(e) => return Err(RemoteError::from(e).into()),
            };
            part.write_all(&chunk)?;
            received += chunk.len() as u64;
            progress.inc(chunk.len() as u64);
        }
        progress.finish_and_clear();

        if let Some(expected) = expected {
            if expected != received {
                return Err(SourceError::DownloadIncomplete {
                    url: url.to_string(),
                    expected,
                    received,
                });
            }
        }

        part.as_file().sync_all()?;
        part.persist(destination).map_err(|e| e.error)?;

        info!("Downloaded {} bytes from {} to {:?}", received, url, destination);
        Ok(received)
    }

    fn progress_bar(&self, total: Option<u64>, file_name: &str) -> ProgressBar {
        if self.silent {
            return ProgressBar::hidden();
        }

        let bar = match total {
            Some(total) => ProgressBar::new(total),
            None => ProgressBar::new_spinner(),
        };
        if let Ok(style) = ProgressStyle::with_template(PROGRESS_TEMPLATE) {
            bar.set_style(style.progress_chars("=> "));
        }
        bar.set_message(file_name.to_string());
        bar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::http_client;
    use mockito::Server;
    use tempfile::TempDir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn downloader() -> Downloader {
        Downloader::new(http_client(), true)
    }

    /// Serve one response that declares `declared` bytes but sends only `body`.
    async fn serve_short_body(declared: usize, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            let head = format!("HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n", declared);
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(body.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn dir_listing(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn download_writes_body_to_destination() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/mondo.owl")
            .with_status(200)
            .with_body("<rdf:RDF/>")
            .create_async()
            .await;

        let temp_dir = TempDir::new().unwrap();
        let destination = temp_dir.path().join("mondo").join("mondo_v2023-09-12.owl");

        let written = downloader()
            .download(&format!("{}/mondo.owl", server.url()), &destination)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(written, 10);
        assert_eq!(std::fs::read_to_string(&destination).unwrap(), "<rdf:RDF/>");
        assert_eq!(
            dir_listing(destination.parent().unwrap()),
            vec!["mondo_v2023-09-12.owl"]
        );
    }

    #[tokio::test]
    async fn download_overwrites_existing_file() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/mondo.owl")
            .with_status(200)
            .with_body("fresh")
            .create_async()
            .await;

        let temp_dir = TempDir::new().unwrap();
        let destination = temp_dir.path().join("mondo_v2023-09-12.owl");
        std::fs::write(&destination, "stale").unwrap();

        downloader()
            .download(&format!("{}/mondo.owl", server.url()), &destination)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(std::fs::read_to_string(&destination).unwrap(), "fresh");
    }

    #[tokio::test]
    async fn failed_download_leaves_no_files() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/mondo.owl")
            .with_status(500)
            .with_body("internal error")
            .create_async()
            .await;

        let temp_dir = TempDir::new().unwrap();
        let destination = temp_dir.path().join("mondo_v2023-09-12.owl");

        let result = downloader()
            .download(&format!("{}/mondo.owl", server.url()), &destination)
            .await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(SourceError::Remote(RemoteError::InvalidResponse(_)))
        ));
        assert!(dir_listing(temp_dir.path()).is_empty());
    }

    #[tokio::test]
    async fn missing_remote_file_is_not_found() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/gone.owl")
            .with_status(404)
            .create_async()
            .await;

        let temp_dir = TempDir::new().unwrap();
        let destination = temp_dir.path().join("mondo_v2023-09-12.owl");

        let result = downloader()
            .download(&format!("{}/gone.owl", server.url()), &destination)
            .await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(SourceError::Remote(RemoteError::NotFound(_)))
        ));
        assert!(!destination.exists());
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let temp_dir = TempDir::new().unwrap();
        let destination = temp_dir.path().join("mondo_v2023-09-12.owl");

        let result = downloader()
            .download("http://127.0.0.1:1/mondo.owl", &destination)
            .await;

        assert!(matches!(
            result,
            Err(SourceError::Remote(RemoteError::Network(_)))
        ));
        assert!(dir_listing(temp_dir.path()).is_empty());
    }

    #[tokio::test]
    async fn truncated_body_is_download_incomplete() {
        let base_url = serve_short_body(100, "0123456789").await;

        let temp_dir = TempDir::new().unwrap();
        let destination = temp_dir.path().join("mondo_v2023-09-12.owl");

        let result = downloader()
            .download(&format!("{}/mondo.owl", base_url), &destination)
            .await;

        assert!(matches!(
            result,
            Err(SourceError::DownloadIncomplete { expected: 100, .. })
        ));
        assert!(dir_listing(temp_dir.path()).is_empty());
    }
}
