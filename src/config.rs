// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_MANIFEST_URL: &str =
    "https://launchermeta.mojang.com/mc/game/version_manifest_v2.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub workspace: WorkspaceConfig,
    pub manifest: ManifestConfig,
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkspaceConfig {
    #[serde(default)]
    pub work_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ManifestConfig {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolsConfig {
    pub java_bin: String,
    pub remapper_jar: PathBuf,
    pub decompiler_jar: PathBuf,
}

impl WorkspaceConfig {
    /// Resolved location for downloaded and generated files. An explicit
    /// `work_dir` wins; otherwise a subfolder of the current directory,
    /// except on macOS where the app-bundle working directory is not
    /// writable and the folder lives under the user's home instead.
    pub fn resolve_work_dir(&self) -> PathBuf {
        if let Some(dir) = &self.work_dir {
            return dir.clone();
        }
        default_work_dir()
    }
}

#[cfg(target_os = "macos")]
fn default_work_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join("McDeob"))
        .unwrap_or_else(|| PathBuf::from("./deobf-work"))
}

#[cfg(not(target_os = "macos"))]
fn default_work_dir() -> PathBuf {
    PathBuf::from("./deobf-work")
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("MC_DEOB")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            workspace: WorkspaceConfig { work_dir: None },
            manifest: ManifestConfig {
                url: DEFAULT_MANIFEST_URL.to_string(),
            },
            tools: ToolsConfig {
                java_bin: "java".to_string(),
                remapper_jar: PathBuf::from("tools/reconstruct.jar"),
                decompiler_jar: PathBuf::from("tools/decompiler.jar"),
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.tools.java_bin.trim().is_empty() {
            return Err(PipelineError::Config(
                "tools.java_bin must not be empty".to_string(),
            ));
        }

        if self.tools.remapper_jar.as_os_str().is_empty() {
            return Err(PipelineError::Config(
                "tools.remapper_jar must not be empty".to_string(),
            ));
        }

        if self.tools.decompiler_jar.as_os_str().is_empty() {
            return Err(PipelineError::Config(
                "tools.decompiler_jar must not be empty".to_string(),
            ));
        }

        Validator::validate_url(&self.manifest.url)
            .map_err(|e| PipelineError::Config(format!("manifest.url: {}", e)))?;

        Ok(())
    }
}
