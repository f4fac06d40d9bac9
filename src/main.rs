//! Logship - Spark Log Publisher
//!
//! Sparkのドライバー/エグゼキューターログを定期的にS3へコピー

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;

use logship::driver::workflow::load_config;
use logship::driver::{Args, LogShippingWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    // Load configuration
    let config = load_config(&args.config)?;

    // Create workflow with injected dependencies
    let workflow = LogShippingWorkflow::new(config);

    workflow.execute(args).await
}
