//! Configuration
//!
//! JSON設定ファイルの読み込み

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::domain::entities::publisher_config::{
    PublisherConfig, DEFAULT_DRIVER_LOG_FILE, DEFAULT_EXECUTOR_LOG_DIR, DEFAULT_INTERVAL_SECS,
};

fn default_interval_secs() -> u64 {
    DEFAULT_INTERVAL_SECS
}

fn default_enabled() -> bool {
    true
}

/// 1つのパブリッシャーの設定セクション
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PublisherSection {
    pub bucket: String,
    #[serde(default)]
    pub prefix: String,
    /// 省略時はドライバー/エグゼキューターそれぞれのデフォルトパス
    #[serde(default)]
    pub local_path: Option<PathBuf>,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

/// S3クライアントの設定
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct S3Settings {
    #[serde(default)]
    pub region: Option<String>,
    /// S3互換ストア用のエンドポイント
    #[serde(default)]
    pub endpoint_url: Option<String>,
    #[serde(default)]
    pub force_path_style: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub driver: Option<PublisherSection>,
    #[serde(default)]
    pub executor: Option<PublisherSection>,
    #[serde(default)]
    pub s3: S3Settings,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;
        Ok(config)
    }

    /// Driver publisher settings, or `None` when the section is absent or disabled.
    pub fn driver_publisher(&self) -> Option<PublisherConfig> {
        self.driver
            .as_ref()
            .filter(|section| section.enabled)
            .map(|section| {
                section.apply(PublisherConfig::driver(section.bucket.clone()), DEFAULT_DRIVER_LOG_FILE)
            })
    }

    /// Executor publisher settings, or `None` when the section is absent or disabled.
    pub fn executor_publisher(&self) -> Option<PublisherConfig> {
        self.executor
            .as_ref()
            .filter(|section| section.enabled)
            .map(|section| {
                section.apply(
                    PublisherConfig::executor(section.bucket.clone()),
                    DEFAULT_EXECUTOR_LOG_DIR,
                )
            })
    }
}

impl PublisherSection {
    fn apply(&self, base: PublisherConfig, default_path: &str) -> PublisherConfig {
        let path = self
            .local_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(default_path));
        base.with_prefix(self.prefix.clone())
            .with_path(path)
            .with_interval_secs(self.interval_secs)
    }
}
