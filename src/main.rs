// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use mc_deob::utils::logging;
use mc_deob::{
    CommandDecompiler, CommandRemapper, Config, ConsoleStatusSink, HttpFetcher, ManifestClient,
    NoopStatusSink, PipelineRunner, ReleaseTarget, ReleaseType, StatusSink,
};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::{error, info, warn};

const EXIT_REMAP_ARGUMENTS: i32 = 2;

#[derive(Parser)]
#[command(name = "mc_deob")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Deobfuscation pipeline for Minecraft client and server jars", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ReleaseKind {
    Client,
    Server,
}

impl From<ReleaseKind> for ReleaseType {
    fn from(kind: ReleaseKind) -> Self {
        match kind {
            ReleaseKind::Client => ReleaseType::Client,
            ReleaseKind::Server => ReleaseType::Server,
        }
    }
}

impl std::fmt::Display for ReleaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReleaseKind::Client => f.write_str("client"),
            ReleaseKind::Server => f.write_str("server"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Download, remap, and optionally decompile a release
    Run {
        /// Version string, e.g. 1.20.1
        version: String,

        #[arg(long = "type", value_enum, default_value_t = ReleaseKind::Client)]
        release_type: ReleaseKind,

        #[arg(long)]
        decompile: bool,

        /// Direct artifact URL, bypassing manifest resolution
        #[arg(long, requires = "mappings_url")]
        artifact_url: Option<String>,

        /// Direct mappings URL, bypassing manifest resolution
        #[arg(long, requires = "artifact_url")]
        mappings_url: Option<String>,

        #[arg(long, value_name = "DIR")]
        work_dir: Option<PathBuf>,

        /// Suppress the terminal status display
        #[arg(long)]
        quiet: bool,
    },

    /// Resolve and print the download URLs for a version
    Resolve {
        version: String,

        #[arg(long = "type", value_enum, default_value_t = ReleaseKind::Client)]
        release_type: ReleaseKind,
    },

    /// Delete the work directory
    Clean {
        #[arg(long)]
        confirm: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logger(cli.color, cli.verbose);

    info!("Minecraft deobfuscation pipeline");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Run {
            version,
            release_type,
            decompile,
            artifact_url,
            mappings_url,
            work_dir,
            quiet,
        } => {
            cmd_run(
                &config,
                &version,
                release_type.into(),
                decompile,
                artifact_url,
                mappings_url,
                work_dir,
                quiet,
            )
            .await?;
        }
        Commands::Resolve {
            version,
            release_type,
        } => {
            cmd_resolve(&config, &version, release_type.into()).await?;
        }
        Commands::Clean { confirm } => {
            cmd_clean(&config, confirm)?;
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn cmd_run(
    config: &Config,
    version: &str,
    release_type: ReleaseType,
    decompile: bool,
    artifact_url: Option<String>,
    mappings_url: Option<String>,
    work_dir: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let target = resolve_target(config, version, release_type, artifact_url, mappings_url).await?;

    let work_dir = work_dir.unwrap_or_else(|| config.workspace.resolve_work_dir());
    std::fs::create_dir_all(&work_dir)
        .with_context(|| format!("Failed to create work directory {}", work_dir.display()))?;
    info!("Work directory: {}", work_dir.display());

    let sink: Arc<dyn StatusSink> = if quiet {
        Arc::new(NoopStatusSink)
    } else {
        Arc::new(ConsoleStatusSink::new())
    };

    let runner = PipelineRunner::new(
        target,
        &work_dir,
        HttpFetcher::new(),
        CommandRemapper::new(&config.tools),
        CommandDecompiler::new(&config.tools),
        sink,
        decompile,
    );

    match runner.run().await {
        Ok(summary) => {
            if summary.remap_skipped {
                info!("Remap stage reused {}", summary.remapped.display());
            }
            println!(
                "{}",
                logging::format_success(&format!(
                    "Completed in {} milliseconds: {}",
                    summary.elapsed_ms,
                    summary.remapped.display()
                ))
            );
            Ok(())
        }
        Err(e) if e.is_fatal() => {
            error!("Encountered an error while constructing remapper arguments: {}", e);
            eprintln!("{}", logging::format_error(&e.to_string()));
            process::exit(EXIT_REMAP_ARGUMENTS);
        }
        // A failed download aborts the run but is surfaced through the log
        // alone, without a non-zero exit.
        Err(e) if e.is_transfer() => {
            error!("{}", e);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

async fn resolve_target(
    config: &Config,
    version: &str,
    release_type: ReleaseType,
    artifact_url: Option<String>,
    mappings_url: Option<String>,
) -> Result<ReleaseTarget> {
    if let (Some(artifact), Some(mappings)) = (artifact_url, mappings_url) {
        info!("Using explicit download URLs");
        return Ok(ReleaseTarget::new(release_type, version, artifact, mappings)?);
    }

    let manifest = ManifestClient::new(config.manifest.clone());
    let target = manifest
        .resolve(release_type, version)
        .await
        .context("Failed to resolve version from manifest")?;
    Ok(target)
}

async fn cmd_resolve(config: &Config, version: &str, release_type: ReleaseType) -> Result<()> {
    let manifest = ManifestClient::new(config.manifest.clone());
    let target = manifest
        .resolve(release_type, version)
        .await
        .context("Failed to resolve version from manifest")?;

    println!("{} {}", target.release_type, target.version);
    println!("  artifact: {}", target.artifact_url);
    println!("  mappings: {}", target.mappings_url);
    Ok(())
}

fn cmd_clean(config: &Config, confirm: bool) -> Result<()> {
    let work_dir = config.workspace.resolve_work_dir();

    if !confirm {
        error!(
            "This will delete {}. Use --confirm to proceed",
            work_dir.display()
        );
        return Ok(());
    }

    if work_dir.exists() {
        std::fs::remove_dir_all(&work_dir)
            .with_context(|| format!("Failed to delete {}", work_dir.display()))?;
        info!("Deleted {}", work_dir.display());
    } else {
        info!("Nothing to clean at {}", work_dir.display());
    }

    Ok(())
}
