// file: src/pipeline/runner.rs
// description: coordinates download, remap, and decompile stages in strict order
// reference: orchestrates the deobfuscation workflow

use crate::error::{PipelineError, Result};
use crate::pipeline::status::StatusSink;
use crate::tools::{DecompileArgs, Decompiler, RemapArgs, Remapper};
use crate::transfer::Fetcher;
use crate::version::ReleaseTarget;
use colored::Color;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use walkdir::WalkDir;

pub const DECOMPILE_DIR_NAME: &str = "final-decompile";

/// Stage output locations, computed once from the work directory and the
/// release target and read thereafter.
#[derive(Debug, Clone)]
pub struct StagePaths {
    pub artifact: PathBuf,
    pub mappings: PathBuf,
    pub remapped: PathBuf,
    pub decompile_dir: PathBuf,
}

impl StagePaths {
    pub fn new(work_dir: &Path, target: &ReleaseTarget) -> Self {
        Self {
            artifact: work_dir.join(target.artifact_file_name()),
            mappings: work_dir.join(target.mappings_file_name()),
            remapped: work_dir.join(target.remapped_file_name()),
            decompile_dir: work_dir.join(DECOMPILE_DIR_NAME),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineSummary {
    pub artifact: PathBuf,
    pub mappings: PathBuf,
    pub remapped: PathBuf,
    pub decompile_dir: Option<PathBuf>,
    pub remap_skipped: bool,
    pub elapsed_ms: u128,
}

/// Executes the four stages in strict order: fetch artifact, fetch
/// mappings, remap, optionally decompile. The first failure aborts the
/// run; the only skip conditions are an existing remapped output and a
/// disabled decompile flag.
pub struct PipelineRunner<F, R, D> {
    target: ReleaseTarget,
    paths: StagePaths,
    fetcher: F,
    remapper: R,
    decompiler: D,
    sink: Arc<dyn StatusSink>,
    decompile: bool,
}

impl<F, R, D> PipelineRunner<F, R, D>
where
    F: Fetcher,
    R: Remapper,
    D: Decompiler,
{
    pub fn new(
        target: ReleaseTarget,
        work_dir: &Path,
        fetcher: F,
        remapper: R,
        decompiler: D,
        sink: Arc<dyn StatusSink>,
        decompile: bool,
    ) -> Self {
        let paths = StagePaths::new(work_dir, &target);
        Self {
            target,
            paths,
            fetcher,
            remapper,
            decompiler,
            sink,
            decompile,
        }
    }

    pub fn paths(&self) -> &StagePaths {
        &self.paths
    }

    pub async fn run(&self) -> Result<PipelineSummary> {
        let started = Instant::now();

        self.fetch_artifact().await?;
        self.fetch_mappings().await?;

        let remap_skipped = match self.remap() {
            Ok(skipped) => skipped,
            Err(e) => {
                if e.is_fatal() {
                    self.sink.update_status("fail");
                }
                return Err(e);
            }
        };

        let decompile_dir = if self.decompile {
            self.run_decompile()?;
            Some(self.paths.decompile_dir.clone())
        } else {
            None
        };

        let elapsed_ms = started.elapsed().as_millis();
        info!("Process finished in {} milliseconds", elapsed_ms);
        self.sink
            .update_status(&format!("Completed in {} milliseconds", elapsed_ms));
        self.sink.update_button("Ready");

        Ok(PipelineSummary {
            artifact: self.paths.artifact.clone(),
            mappings: self.paths.mappings.clone(),
            remapped: self.paths.remapped.clone(),
            decompile_dir,
            remap_skipped,
            elapsed_ms,
        })
    }

    async fn fetch_artifact(&self) -> Result<()> {
        let start = Instant::now();
        info!("Downloading {} jar from Mojang", self.target.release_type);
        self.sink.update_status("Downloading jar");
        self.sink
            .update_button_highlighted("Downloading jar", Color::Blue);

        let bytes = self
            .fetcher
            .fetch(&self.target.artifact_url, &self.paths.artifact)
            .await?;

        info!(
            "Downloaded jar ({} bytes) in {} milliseconds",
            bytes,
            start.elapsed().as_millis()
        );
        Ok(())
    }

    async fn fetch_mappings(&self) -> Result<()> {
        let start = Instant::now();
        info!("Downloading mappings file from Mojang");
        self.sink.update_status("Downloading mappings");
        self.sink
            .update_button_highlighted("Downloading mappings", Color::Blue);

        let bytes = self
            .fetcher
            .fetch(&self.target.mappings_url, &self.paths.mappings)
            .await?;

        info!(
            "Downloaded mappings ({} bytes) in {} milliseconds",
            bytes,
            start.elapsed().as_millis()
        );
        Ok(())
    }

    /// Returns true when the existing remapped output made the stage a
    /// no-op. This existence check is the pipeline's only caching.
    fn remap(&self) -> Result<bool> {
        let start = Instant::now();
        self.sink.update_status("Remapping...");
        self.sink.update_button_highlighted("Remapping...", Color::Blue);

        if self.paths.remapped.exists() {
            info!(
                "{} already remapped... skipping mapping!",
                self.target.remapped_file_name()
            );
            return Ok(true);
        }

        info!("Remapping {} file...", self.target.artifact_file_name());
        let args = RemapArgs::build(
            &self.target,
            &self.paths.artifact,
            &self.paths.mappings,
            &self.paths.remapped,
        )?;
        self.remapper.remap(&args)?;

        info!(
            "Remapping completed in {} milliseconds",
            start.elapsed().as_millis()
        );
        Ok(false)
    }

    fn run_decompile(&self) -> Result<()> {
        let start = Instant::now();
        info!("Decompiling final jar file");
        self.sink
            .update_status("Decompiling... This will take a while!");
        self.sink
            .update_button_highlighted("Decompiling...", Color::Blue);

        fs::create_dir_all(&self.paths.decompile_dir).map_err(|source| {
            PipelineError::FileOperation {
                path: self.paths.decompile_dir.clone(),
                source,
            }
        })?;

        let args = DecompileArgs::new(&self.paths.remapped, &self.paths.decompile_dir);
        self.decompiler.decompile(&args)?;

        let produced = WalkDir::new(&self.paths.decompile_dir)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .count();

        info!(
            "Decompiling produced {} files in {} milliseconds",
            produced,
            start.elapsed().as_millis()
        );
        Ok(())
    }
}
