// file: src/tools/remapper.rs
// description: argument construction and invocation for the external remapper
// reference: invoke-with-arguments contract, tool internals are opaque

use crate::config::ToolsConfig;
use crate::error::{PipelineError, Result};
use crate::version::{ReleaseTarget, ReleaseType};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Vendored third-party namespaces bundled inside server jars. The server
/// bundles its dependencies unobfuscated; remapping them corrupts the output.
pub const SERVER_EXCLUDED_PACKAGES: &[&str] = &[
    "com.google.",
    "io.netty.",
    "it.unimi.dsi.fastutil.",
    "javax.",
    "joptsimple.",
    "org.apache.",
];

/// Validated argument object for the remapper. Construction failure is the
/// pipeline's distinguished fatal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapArgs {
    input: PathBuf,
    mappings: PathBuf,
    output: PathBuf,
    exclusions: Vec<String>,
}

impl RemapArgs {
    pub fn build(
        target: &ReleaseTarget,
        input: &Path,
        mappings: &Path,
        output: &Path,
    ) -> Result<Self> {
        if !input.is_file() {
            return Err(PipelineError::RemapArguments(format!(
                "Input artifact does not exist: {}",
                input.display()
            )));
        }

        if !mappings.is_file() {
            return Err(PipelineError::RemapArguments(format!(
                "Mapping file does not exist: {}",
                mappings.display()
            )));
        }

        for path in [input, mappings, output] {
            if path.to_str().is_none() {
                return Err(PipelineError::RemapArguments(format!(
                    "Path is not valid UTF-8: {}",
                    path.display()
                )));
            }
        }

        let exclusions = match target.release_type {
            ReleaseType::Server => SERVER_EXCLUDED_PACKAGES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            ReleaseType::Client => Vec::new(),
        };

        Ok(Self {
            input: input.to_path_buf(),
            mappings: mappings.to_path_buf(),
            output: output.to_path_buf(),
            exclusions,
        })
    }

    /// Renders the tool's argument list. The `-agree` flag accepts the
    /// remapper's license prompt so the invocation stays non-interactive.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "-jar".to_string(),
            self.input.display().to_string(),
            "-mapping".to_string(),
            self.mappings.display().to_string(),
            "-output".to_string(),
            self.output.display().to_string(),
        ];

        if !self.exclusions.is_empty() {
            args.push("-exclude".to_string());
            args.push(self.exclusions.join(","));
        }

        args.push("-agree".to_string());
        args
    }

    pub fn has_exclusions(&self) -> bool {
        !self.exclusions.is_empty()
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn mappings(&self) -> &Path {
        &self.mappings
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}

/// Invokes the remapper on a constructed argument object. Synchronous by
/// contract: the pipeline blocks until the tool exits.
pub trait Remapper {
    fn remap(&self, args: &RemapArgs) -> Result<()>;
}

/// Runs the remapper jar through the configured Java launcher.
pub struct CommandRemapper {
    java_bin: String,
    tool_jar: PathBuf,
}

impl CommandRemapper {
    pub fn new(tools: &ToolsConfig) -> Self {
        Self {
            java_bin: tools.java_bin.clone(),
            tool_jar: tools.remapper_jar.clone(),
        }
    }
}

impl Remapper for CommandRemapper {
    fn remap(&self, args: &RemapArgs) -> Result<()> {
        let tool_args = args.to_args();
        debug!("Remapper arguments: {:?}", tool_args);

        let status = Command::new(&self.java_bin)
            .arg("-jar")
            .arg(&self.tool_jar)
            .args(&tool_args)
            .status()
            .map_err(|source| PipelineError::ToolLaunch {
                tool: "remapper",
                source,
            })?;

        if !status.success() {
            return Err(PipelineError::ToolFailure {
                tool: "remapper",
                code: status.code(),
            });
        }

        info!("Remapper wrote {}", args.output.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn fixture(release_type: ReleaseType) -> (TempDir, ReleaseTarget, PathBuf, PathBuf, PathBuf) {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("minecraft.jar");
        let mappings = temp.path().join("mappings.txt");
        let output = temp.path().join("remapped.jar");
        std::fs::write(&input, "jar bytes").unwrap();
        std::fs::write(&mappings, "a -> b").unwrap();

        let target = ReleaseTarget::new(
            release_type,
            "1.20.1",
            "https://example.com/a.jar",
            "https://example.com/m.txt",
        )
        .unwrap();

        (temp, target, input, mappings, output)
    }

    #[test]
    fn test_client_args_carry_no_exclusions() {
        let (_temp, target, input, mappings, output) = fixture(ReleaseType::Client);
        let args = RemapArgs::build(&target, &input, &mappings, &output).unwrap();

        assert!(!args.has_exclusions());

        let rendered = args.to_args();
        assert!(!rendered.contains(&"-exclude".to_string()));
        assert_eq!(rendered.last().unwrap(), "-agree");
    }

    #[test]
    fn test_server_args_carry_exclusions() {
        let (_temp, target, input, mappings, output) = fixture(ReleaseType::Server);
        let args = RemapArgs::build(&target, &input, &mappings, &output).unwrap();

        assert!(args.has_exclusions());

        let rendered = args.to_args();
        let exclude_pos = rendered.iter().position(|a| a == "-exclude").unwrap();
        assert_eq!(
            rendered[exclude_pos + 1],
            "com.google.,io.netty.,it.unimi.dsi.fastutil.,javax.,joptsimple.,org.apache."
        );
        assert_eq!(rendered.last().unwrap(), "-agree");
    }

    #[test]
    fn test_args_order() {
        let (_temp, target, input, mappings, output) = fixture(ReleaseType::Client);
        let args = RemapArgs::build(&target, &input, &mappings, &output).unwrap();

        let rendered = args.to_args();
        assert_eq!(rendered[0], "-jar");
        assert_eq!(rendered[1], input.display().to_string());
        assert_eq!(rendered[2], "-mapping");
        assert_eq!(rendered[3], mappings.display().to_string());
        assert_eq!(rendered[4], "-output");
        assert_eq!(rendered[5], output.display().to_string());
    }

    #[test]
    fn test_build_fails_without_input_artifact() {
        let (temp, target, _input, mappings, output) = fixture(ReleaseType::Client);
        let missing = temp.path().join("missing.jar");

        let result = RemapArgs::build(&target, &missing, &mappings, &output);
        match result {
            Err(e) => assert!(e.is_fatal()),
            Ok(_) => panic!("expected a fatal argument error"),
        }
    }

    #[test]
    fn test_build_fails_without_mappings() {
        let (temp, target, input, _mappings, output) = fixture(ReleaseType::Client);
        let missing = temp.path().join("missing.txt");

        let result = RemapArgs::build(&target, &input, &missing, &output);
        match result {
            Err(e) => assert!(e.is_fatal()),
            Ok(_) => panic!("expected a fatal argument error"),
        }
    }
}
