mod config;
mod dir_walker;
mod error;
mod file_processor;
mod log_record;
mod uploader;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uploader::Uploader;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let cli = config::Cli::parse();

    // Load configuration
    let config = config::load_config(&cli)?;

    let level: LevelFilter = config
        .log_level
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid log level: {}", config.log_level))?;
    SimpleLogger::new()
        .with_level(level)
        .env()
        .init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    info!("Starting logship");

    let timeout = config.upload_timeout_secs.map(Duration::from_secs);
    let uploader = Uploader::new(&config.upload_url, timeout)
        .context("Failed to create uploader")?;
    let uploader = Arc::new(uploader);

    info!(
        "Shipping {} as application {} to {}",
        config.log_dir.display(),
        config.application_id,
        uploader.url()
    );

    let start = Instant::now();
    let summary = dir_walker::ship_directory(
        &config.log_dir,
        &config.application_id,
        uploader,
        config.max_concurrent_files,
    )
    .await?;

    info!(
        "Processed {} files: {} uploaded, {} failed, {} malformed, {} files skipped",
        summary.files, summary.uploaded, summary.failed, summary.malformed, summary.skipped_files
    );
    println!("Finished uploading logs in {:?}", start.elapsed());

    Ok(())
}
