// file: src/transfer/fetch.rs
// description: streaming HTTP download of remote artifacts to local files
// reference: https://docs.rs/reqwest

use crate::error::{PipelineError, Result};
use crate::utils::Validator;
use futures::StreamExt;
use reqwest::Client;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Seam between the pipeline and the network. The pipeline only needs
/// "stream this URL into that file"; tests substitute a stub.
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64>;
}

#[derive(Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Fetcher for HttpFetcher {
    /// Streams the response body into `dest`, deleting and recreating the
    /// file first. No retry, no timeout, no partial resume: the first
    /// failure aborts the transfer and leaves whatever was written.
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64> {
        Validator::validate_url(url)?;

        if dest.exists() {
            tokio::fs::remove_file(dest)
                .await
                .map_err(|source| PipelineError::FileOperation {
                    path: dest.to_path_buf(),
                    source,
                })?;
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| PipelineError::Transfer {
                url: url.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(PipelineError::UnexpectedStatus {
                url: url.to_string(),
                status: response.status(),
            });
        }

        let mut file =
            tokio::fs::File::create(dest)
                .await
                .map_err(|source| PipelineError::FileOperation {
                    path: dest.to_path_buf(),
                    source,
                })?;

        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|source| PipelineError::Transfer {
                url: url.to_string(),
                source,
            })?;

            file.write_all(&chunk)
                .await
                .map_err(|source| PipelineError::FileOperation {
                    path: dest.to_path_buf(),
                    source,
                })?;

            written += chunk.len() as u64;
        }

        file.flush()
            .await
            .map_err(|source| PipelineError::FileOperation {
                path: dest.to_path_buf(),
                source,
            })?;

        debug!("Wrote {} bytes to {}", written, dest.display());
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_rejects_non_http_url() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("artifact.jar");

        let fetcher = HttpFetcher::new();
        let result = fetcher.fetch("file:///etc/passwd", &dest).await;

        assert!(result.is_err());
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_existing_destination_is_removed_before_transfer() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("artifact.jar");
        std::fs::write(&dest, "stale bytes").unwrap();

        // Unresolvable host: the transfer fails after the stale file has
        // already been deleted, matching the overwrite-unconditionally rule.
        let fetcher = HttpFetcher::new();
        let result = fetcher
            .fetch("http://nonexistent.invalid/artifact.jar", &dest)
            .await;

        assert!(result.is_err());
        assert!(!dest.exists());
    }
}
