use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[clap(name = "logship", version, about)]
pub struct Cli {
    /// Path to an optional TOML configuration file
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Override the directory whose files are shipped
    #[clap(long)]
    pub log_dir: Option<PathBuf>,

    /// Override the application identifier attached to every record
    #[clap(long)]
    pub application_id: Option<String>,

    /// Override the ingestion endpoint URL
    #[clap(long)]
    pub upload_url: Option<String>,

    /// Override how many files are processed at once (0 = no limit)
    #[clap(long)]
    pub max_concurrent_files: Option<usize>,

    /// Override the per-request upload timeout in seconds
    #[clap(long)]
    pub upload_timeout_secs: Option<u64>,

    /// Override the log verbosity (error, warn, info, debug, trace)
    #[clap(long)]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_dir: PathBuf,
    pub application_id: String,
    pub upload_url: String,
    pub max_concurrent_files: usize,
    pub upload_timeout_secs: Option<u64>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("test"),
            application_id: "seata".to_string(),
            upload_url: "http://localhost:8080/upload".to_string(),
            max_concurrent_files: 16,
            upload_timeout_secs: None,
            log_level: "info".to_string(),
        }
    }
}

pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match cli.config {
        Some(ref path) => {
            let config_content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;

            toml::from_str::<Config>(&config_content).context("Failed to parse config file")?
        }
        None => Config::default(),
    };

    // Apply CLI overrides
    if let Some(ref log_dir) = cli.log_dir {
        config.log_dir = log_dir.clone();
    }

    if let Some(ref application_id) = cli.application_id {
        config.application_id = application_id.clone();
    }

    if let Some(ref upload_url) = cli.upload_url {
        config.upload_url = upload_url.clone();
    }

    if let Some(max_concurrent_files) = cli.max_concurrent_files {
        config.max_concurrent_files = max_concurrent_files;
    }

    if let Some(upload_timeout_secs) = cli.upload_timeout_secs {
        config.upload_timeout_secs = Some(upload_timeout_secs);
    }

    if let Some(ref log_level) = cli.log_level {
        config.log_level = log_level.clone();
    }

    Ok(config)
}
