// file: src/version/target.rs
// description: release selector and derived work-directory file names
// reference: internal data structures

use crate::error::{PipelineError, Result};
use crate::utils::Validator;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
    Client,
    Server,
}

impl ReleaseType {
    /// Stable lowercase name used in derived file names.
    pub fn name(&self) -> &'static str {
        match self {
            ReleaseType::Client => "client",
            ReleaseType::Server => "server",
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifies the artifact to deobfuscate: which release, which version,
/// and where its jar and mapping file live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseTarget {
    pub release_type: ReleaseType,
    pub version: String,
    pub artifact_url: String,
    pub mappings_url: String,
}

impl ReleaseTarget {
    pub fn new(
        release_type: ReleaseType,
        version: impl Into<String>,
        artifact_url: impl Into<String>,
        mappings_url: impl Into<String>,
    ) -> Result<Self> {
        let version = version.into();
        let artifact_url = artifact_url.into();
        let mappings_url = mappings_url.into();

        Validator::validate_version_string(&version)?;
        Validator::validate_url(&artifact_url)?;
        Validator::validate_url(&mappings_url)?;

        if artifact_url == mappings_url {
            return Err(PipelineError::Validation(format!(
                "Artifact and mappings URLs are identical: {}",
                artifact_url
            )));
        }

        Ok(Self {
            release_type,
            version,
            artifact_url,
            mappings_url,
        })
    }

    pub fn artifact_file_name(&self) -> String {
        format!("minecraft_{}_{}.jar", self.release_type.name(), self.version)
    }

    pub fn mappings_file_name(&self) -> String {
        format!("mappings_{}_{}.txt", self.release_type.name(), self.version)
    }

    pub fn remapped_file_name(&self) -> String {
        format!("remapped_{}_{}.jar", self.release_type.name(), self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn target(release_type: ReleaseType, version: &str) -> ReleaseTarget {
        ReleaseTarget::new(
            release_type,
            version,
            "https://example.com/artifact.jar",
            "https://example.com/mappings.txt",
        )
        .unwrap()
    }

    #[test]
    fn test_derived_file_names() {
        let t = target(ReleaseType::Client, "1.20.1");
        assert_eq!(t.artifact_file_name(), "minecraft_client_1.20.1.jar");
        assert_eq!(t.mappings_file_name(), "mappings_client_1.20.1.txt");
        assert_eq!(t.remapped_file_name(), "remapped_client_1.20.1.jar");

        let t = target(ReleaseType::Server, "23w31a");
        assert_eq!(t.artifact_file_name(), "minecraft_server_23w31a.jar");
        assert_eq!(t.mappings_file_name(), "mappings_server_23w31a.txt");
        assert_eq!(t.remapped_file_name(), "remapped_server_23w31a.jar");
    }

    #[test]
    fn test_file_names_deterministic() {
        let a = target(ReleaseType::Client, "1.20.1");
        let b = target(ReleaseType::Client, "1.20.1");
        assert_eq!(a.artifact_file_name(), b.artifact_file_name());
        assert_eq!(a.mappings_file_name(), b.mappings_file_name());
        assert_eq!(a.remapped_file_name(), b.remapped_file_name());
    }

    #[test]
    fn test_file_names_never_collide_across_versions() {
        let versions = ["1.20", "1.20.1", "1.20.2", "23w31a", "1.21-rc1"];
        let mut seen = std::collections::HashSet::new();

        for version in versions {
            for release_type in [ReleaseType::Client, ReleaseType::Server] {
                let t = target(release_type, version);
                assert!(seen.insert(t.artifact_file_name()));
                assert!(seen.insert(t.mappings_file_name()));
                assert!(seen.insert(t.remapped_file_name()));
            }
        }
    }

    #[test]
    fn test_rejects_path_hostile_version() {
        let result = ReleaseTarget::new(
            ReleaseType::Client,
            "../escape",
            "https://example.com/a.jar",
            "https://example.com/m.txt",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_identical_urls() {
        let result = ReleaseTarget::new(
            ReleaseType::Client,
            "1.20.1",
            "https://example.com/same",
            "https://example.com/same",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_release_type_names() {
        assert_eq!(ReleaseType::Client.name(), "client");
        assert_eq!(ReleaseType::Server.name(), "server");
        assert_eq!(ReleaseType::Server.to_string(), "server");
    }
}
