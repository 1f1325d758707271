// file: src/tools/decompiler.rs
// description: argument construction and invocation for the external decompiler
// reference: invoke-with-arguments contract, tool internals are opaque

use crate::config::ToolsConfig;
use crate::error::{PipelineError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Fixed formatting options: keep generic signatures as-is, hide default
/// constructors, keep bridge methods, escape non-ASCII strings, ignore the
/// variable-name table.
pub const DECOMPILER_FLAGS: &[&str] = &["-dgs=1", "-hdc=0", "-rbr=0", "-asc=1", "-udv=0"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecompileArgs {
    input: PathBuf,
    output_dir: PathBuf,
}

impl DecompileArgs {
    pub fn new(input: &Path, output_dir: &Path) -> Self {
        Self {
            input: input.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
        }
    }

    pub fn to_args(&self) -> Vec<String> {
        let mut args: Vec<String> = DECOMPILER_FLAGS.iter().map(|f| f.to_string()).collect();
        args.push(self.input.display().to_string());
        args.push(self.output_dir.display().to_string());
        args
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

/// Invokes the decompiler on a remapped artifact. Synchronous by contract.
pub trait Decompiler {
    fn decompile(&self, args: &DecompileArgs) -> Result<()>;
}

/// Runs the decompiler jar through the configured Java launcher.
pub struct CommandDecompiler {
    java_bin: String,
    tool_jar: PathBuf,
}

impl CommandDecompiler {
    pub fn new(tools: &ToolsConfig) -> Self {
        Self {
            java_bin: tools.java_bin.clone(),
            tool_jar: tools.decompiler_jar.clone(),
        }
    }
}

impl Decompiler for CommandDecompiler {
    fn decompile(&self, args: &DecompileArgs) -> Result<()> {
        let tool_args = args.to_args();
        debug!("Decompiler arguments: {:?}", tool_args);

        let status = Command::new(&self.java_bin)
            .arg("-jar")
            .arg(&self.tool_jar)
            .args(&tool_args)
            .status()
            .map_err(|source| PipelineError::ToolLaunch {
                tool: "decompiler",
                source,
            })?;

        if !status.success() {
            return Err(PipelineError::ToolFailure {
                tool: "decompiler",
                code: status.code(),
            });
        }

        info!("Decompiler output in {}", args.output_dir.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flags_precede_paths() {
        let args = DecompileArgs::new(
            Path::new("/work/remapped_client_1.20.1.jar"),
            Path::new("/work/final-decompile"),
        );

        let rendered = args.to_args();
        assert_eq!(
            &rendered[..5],
            &["-dgs=1", "-hdc=0", "-rbr=0", "-asc=1", "-udv=0"]
        );
        assert_eq!(rendered[5], "/work/remapped_client_1.20.1.jar");
        assert_eq!(rendered[6], "/work/final-decompile");
        assert_eq!(rendered.len(), 7);
    }
}
