use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Parser};
use synthesis::{PipelineConfig, PipelineOutcome};

#[derive(Parser, Debug)]
#[command(
    name = "synthesis",
    version,
    about = "Blend numbered source images into one artwork and distort it"
)]
struct Cli {
    /// Pipeline configuration JSON. Fields it omits keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the numbered source images (default: scraped_art).
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Directory the artifacts are written to (default: current directory).
    #[arg(long)]
    work_dir: Option<PathBuf>,

    /// Seed for the augmentation passes. Without it every run differs.
    #[arg(long)]
    seed: Option<u64>,

    /// Log to stderr: -v for stage progress, -vv for sampled parameters.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    println!("Program started");

    let cfg = load_config(&cli)?;
    match synthesis::run_pipeline(&cfg)? {
        PipelineOutcome::MissingInput { guidance } => {
            println!("{guidance}");
        }
        PipelineOutcome::Completed(report) => {
            tracing::info!(
                intermediate = %report.intermediate.display(),
                final_artifact = %report.final_artifact.display(),
                width = report.width,
                height = report.height,
                seed = report.seed,
                "pipeline complete"
            );
            println!("Program finished.");
        }
    }
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<PipelineConfig> {
    let mut cfg = match &cli.config {
        Some(path) => PipelineConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(dir) = &cli.input_dir {
        cfg.input_dir = dir.clone();
    }
    if let Some(dir) = &cli.work_dir {
        cfg.work_dir = dir.clone();
    }
    if cli.seed.is_some() {
        cfg.seed = cli.seed;
    }
    Ok(cfg)
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}
