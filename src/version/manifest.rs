// file: src/version/manifest.rs
// description: Mojang launcher manifest lookup for artifact and mapping URLs
// reference: https://minecraft.wiki/w/Version_manifest.json

use crate::config::ManifestConfig;
use crate::error::{PipelineError, Result};
use crate::version::{ReleaseTarget, ReleaseType};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct VersionIndex {
    versions: Vec<IndexEntry>,
}

#[derive(Debug, Deserialize)]
struct IndexEntry {
    id: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct VersionDetail {
    downloads: DownloadsSection,
}

#[derive(Debug, Default, Deserialize)]
struct DownloadsSection {
    client: Option<DownloadEntry>,
    server: Option<DownloadEntry>,
    client_mappings: Option<DownloadEntry>,
    server_mappings: Option<DownloadEntry>,
}

#[derive(Debug, Deserialize)]
struct DownloadEntry {
    url: String,
    #[allow(dead_code)]
    sha1: String,
    size: u64,
}

/// Resolves a (release type, version) pair into concrete download URLs by
/// walking the launcher metadata: the version index first, then the
/// per-version detail document.
pub struct ManifestClient {
    client: Client,
    config: ManifestConfig,
}

impl ManifestClient {
    pub fn new(config: ManifestConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub async fn resolve(&self, release_type: ReleaseType, version: &str) -> Result<ReleaseTarget> {
        info!("Resolving {} {} from version manifest", release_type, version);

        let index: VersionIndex = self.get_json(&self.config.url).await?;
        debug!("Manifest lists {} versions", index.versions.len());

        let entry = index
            .versions
            .iter()
            .find(|entry| entry.id == version)
            .ok_or_else(|| {
                PipelineError::Manifest(format!("Version {} not found in manifest", version))
            })?;

        let detail: VersionDetail = self.get_json(&entry.url).await?;
        let downloads = detail.downloads;

        let (artifact, mappings) = match release_type {
            ReleaseType::Client => (downloads.client, downloads.client_mappings),
            ReleaseType::Server => (downloads.server, downloads.server_mappings),
        };

        let artifact = artifact.ok_or_else(|| {
            PipelineError::Manifest(format!(
                "Version {} has no {} download",
                version, release_type
            ))
        })?;

        let mappings = mappings.ok_or_else(|| {
            PipelineError::Manifest(format!(
                "Version {} has no published {} mappings",
                version, release_type
            ))
        })?;

        debug!(
            "Resolved artifact ({} bytes) and mappings ({} bytes)",
            artifact.size, mappings.size
        );

        ReleaseTarget::new(release_type, version, artifact.url, mappings.url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
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

        response
            .json()
            .await
            .map_err(|e| PipelineError::Manifest(format!("Malformed manifest at {}: {}", url, e)))
    }
}
