//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::Parser;

/// Config file used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "./logship.json";

/// Sparkのログを定期的にS3へコピーするCLI
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "logship")]
#[command(about = "Periodically copy Spark driver and executor logs to S3", long_about = None)]
pub struct Args {
    /// Config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Dry run mode - log what would be uploaded without uploading
    #[arg(long)]
    pub dry_run: bool,

    /// Destination bucket for both publishers (overrides the config file)
    #[arg(long)]
    pub bucket: Option<String>,

    /// Destination key prefix for both publishers (overrides the config file)
    #[arg(long)]
    pub prefix: Option<String>,

    /// Seconds between uploads for both publishers (overrides the config file)
    #[arg(long)]
    pub interval: Option<u64>,
}
