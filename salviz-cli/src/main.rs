//! Command-line entry point for the salary visualization report

use anyhow::Result;
use clap::Parser;
use salviz_common::{init_logging, LoggingConfig};
use salviz_config::ConfigLoader;
use salviz_graphs::{ChartPipeline, SalaryTable};
use std::path::PathBuf;
use tracing::info;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Input dataset path, overriding the configured one
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Output directory, overriding the configured one
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level, overriding the configured one
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_config(path)?,
        None => ConfigLoader::load()?,
    };
    if let Some(data) = args.data {
        config.data.file = data;
    }
    if let Some(output) = args.output {
        config.output.directory = output;
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }

    // Initialize logging
    init_logging(LoggingConfig {
        level: config.logging.level.clone(),
        file_path: config
            .logging
            .file
            .as_ref()
            .map(|p| p.to_string_lossy().to_string()),
        ..LoggingConfig::default()
    })
    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    info!("Starting salary visualization report");

    let table = SalaryTable::load(&config.data.file)?;
    info!(
        rows = table.len(),
        years = table.distinct_years().len(),
        "Dataset ready"
    );

    let pipeline = ChartPipeline::new(table, &config.output.directory, config.output.scale);
    let artifacts = pipeline.run_all().await?;

    for artifact in &artifacts {
        info!(path = %artifact.display(), "Wrote artifact");
    }
    info!(count = artifacts.len(), "Report finished");

    Ok(())
}
