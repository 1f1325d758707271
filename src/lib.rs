// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod pipeline;
pub mod tools;
pub mod transfer;
pub mod utils;
pub mod version;

pub use config::{Config, ManifestConfig, ToolsConfig, WorkspaceConfig};
pub use error::{PipelineError, Result};
pub use pipeline::{
    ConsoleStatusSink, NoopStatusSink, PipelineRunner, PipelineSummary, StagePaths, StatusSink,
};
pub use tools::{CommandDecompiler, CommandRemapper, DecompileArgs, Decompiler, RemapArgs, Remapper};
pub use transfer::{Fetcher, HttpFetcher};
pub use utils::Validator;
pub use version::{ManifestClient, ReleaseTarget, ReleaseType};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let _config = Config::default_config();
        let _sink = NoopStatusSink;
    }
}
