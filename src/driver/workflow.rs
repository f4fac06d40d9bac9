//! Workflow Orchestration
//!
//! パブリッシャーの組み立てと起動・停止

use anyhow::{bail, Result};
use log::{error, info, warn};
use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use crate::adapter::config::Config;
use crate::adapter::repositories::file_log_repository::FileLogRepository;
use crate::adapter::storage::dry_run_store::DryRunObjectStore;
use crate::adapter::storage::s3_store::S3ObjectStore;
use crate::application::publisher::{LogPublisher, PublisherHandle};
use crate::application::use_cases::publish_logs::PublishLogsUseCase;
use crate::domain::entities::publisher_config::PublisherConfig;
use crate::domain::repositories::object_store::ObjectStore;

use super::cli::{Args, DEFAULT_CONFIG_PATH};

/// Loads the config file.
///
/// Only the default path may be missing, in which case an empty config is used
/// so that `--bucket` alone starts both publishers with default paths.
/// A missing file given explicitly with `--config` is an error.
pub fn load_config(path: &str) -> Result<Config> {
    if Path::new(path).exists() {
        Config::load(path)
    } else if path == DEFAULT_CONFIG_PATH {
        info!("Config file {} not found, using defaults", path);
        Ok(Config::default())
    } else {
        bail!("Config file not found: {}", path)
    }
}

/// Resolve the publisher configurations from the config file and CLI overrides
pub fn resolve_publishers(config: &Config, args: &Args) -> Result<Vec<PublisherConfig>> {
    let mut publishers = Vec::new();

    let driver = config.driver_publisher();
    let executor = config.executor_publisher();

    // --bucket だけで起動した場合はデフォルトパスで両方を有効にする
    let no_sections = config.driver.is_none() && config.executor.is_none();
    match (driver, args.bucket.as_ref()) {
        (Some(driver), _) => publishers.push(driver),
        (None, Some(bucket)) if no_sections => publishers.push(PublisherConfig::driver(bucket)),
        _ => {}
    }
    match (executor, args.bucket.as_ref()) {
        (Some(executor), _) => publishers.push(executor),
        (None, Some(bucket)) if no_sections => publishers.push(PublisherConfig::executor(bucket)),
        _ => {}
    }

    let publishers = publishers
        .into_iter()
        .map(|mut publisher| {
            if let Some(bucket) = &args.bucket {
                publisher.bucket = bucket.clone();
            }
            if let Some(prefix) = &args.prefix {
                publisher.prefix = prefix.clone();
            }
            if let Some(interval) = args.interval {
                publisher.interval_secs = interval;
            }
            publisher.validate()?;
            Ok(publisher)
        })
        .collect::<Result<Vec<_>>>()?;

    if publishers.is_empty() {
        bail!("No publisher configured: add a driver or executor section, or pass --bucket");
    }

    Ok(publishers)
}

/// Resolves when SIGINT or SIGTERM is received
pub async fn shutdown_signal() {
    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            // SIGTERM not supported
            Err(_) => std::future::pending::<()>().await,
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {},
        _ = terminate => {},
    }
}

/// Log Shipping Workflow
pub struct LogShippingWorkflow {
    config: Config,
}

impl LogShippingWorkflow {
    /// Create a new workflow instance with dependency injection
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Object store for one publisher. Each publisher gets its own client.
    async fn object_store(&self, dry_run: bool) -> Arc<dyn ObjectStore> {
        if dry_run {
            Arc::new(DryRunObjectStore)
        } else {
            Arc::new(S3ObjectStore::from_env(&self.config.s3).await)
        }
    }

    /// Build and start every configured publisher
    pub async fn start(&self, args: &Args) -> Result<Vec<PublisherHandle>> {
        let publishers = resolve_publishers(&self.config, args)?;
        let log_repo = Arc::new(FileLogRepository::new());

        let mut handles = Vec::with_capacity(publishers.len());
        for publisher_config in publishers {
            info!(
                "Publishing Spark {} to s3://{} (prefix '{}', every {}s)",
                publisher_config.source,
                publisher_config.bucket,
                publisher_config.prefix,
                publisher_config.interval_secs
            );

            let store = self.object_store(args.dry_run).await;
            let use_case = PublishLogsUseCase::new(log_repo.clone(), store);
            handles.push(LogPublisher::new(publisher_config, use_case).start());
        }

        Ok(handles)
    }

    /// Run the publishers until `shutdown` resolves, then stop and join them
    ///
    /// A publisher that dies early is logged; the others keep running.
    pub async fn run_until<F>(&self, args: Args, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        if args.dry_run {
            info!("Dry run mode: nothing will be uploaded");
        }

        let handles = self.start(&args).await?;

        shutdown.await;
        info!("Shutdown requested, stopping {} publisher(s)", handles.len());

        for handle in &handles {
            handle.stop();
        }

        let mut failed = 0;
        for handle in handles {
            let kind = handle.kind();
            if handle.join().await.is_err() {
                warn!("Spark {} log publisher did not finish cleanly", kind);
                failed += 1;
            }
        }

        if failed > 0 {
            error!("{} publisher(s) stopped with errors", failed);
            bail!("{} publisher(s) stopped with errors", failed);
        }

        info!("All publishers stopped");
        Ok(())
    }

    /// Execute the workflow until SIGINT / SIGTERM
    pub async fn execute(&self, args: Args) -> Result<()> {
        self.run_until(args, shutdown_signal()).await
    }
}
