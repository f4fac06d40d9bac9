//! # Publisher Configuration
//!
//! パブリッシャーの設定を表すバリューオブジェクト

use anyhow::{bail, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default location of the Spark driver log file
pub const DEFAULT_DRIVER_LOG_FILE: &str = "/var/log/spark_driver_logs.txt";
/// Default root of the Spark executor (YARN container) logs
pub const DEFAULT_EXECUTOR_LOG_DIR: &str = "/var/log/yarn";
/// Default seconds between two upload passes
pub const DEFAULT_INTERVAL_SECS: u64 = 20;

/// 監視対象のローカルパス
///
/// ドライバーは単一ファイル、エグゼキューターはディレクトリツリー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSource {
    /// Single driver log file
    DriverFile(PathBuf),
    /// Directory tree of executor log files
    ExecutorDir(PathBuf),
}

impl LogSource {
    /// ローカルパスへの参照を返す
    pub fn path(&self) -> &Path {
        match self {
            LogSource::DriverFile(path) | LogSource::ExecutorDir(path) => path,
        }
    }

    /// Human readable kind, used in log lines ("driver" / "executor")
    pub fn kind(&self) -> &'static str {
        match self {
            LogSource::DriverFile(_) => "driver",
            LogSource::ExecutorDir(_) => "executor",
        }
    }
}

impl fmt::Display for LogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind(), self.path().display())
    }
}

/// パブリッシャー設定
///
/// 起動時に一度だけ作成され、以降は変更されない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublisherConfig {
    /// アップロード先バケット
    pub bucket: String,
    /// オブジェクトキーのプレフィックス（デフォルトは空）
    pub prefix: String,
    /// 監視対象のローカルパス
    pub source: LogSource,
    /// アップロード間隔（秒）
    pub interval_secs: u64,
}

impl PublisherConfig {
    /// ドライバーログ用の設定をデフォルト値で作成
    ///
    /// ```
    /// use logship::domain::entities::publisher_config::PublisherConfig;
    ///
    /// let config = PublisherConfig::driver("logs-bucket");
    /// assert_eq!(config.prefix, "");
    /// assert_eq!(config.interval_secs, 20);
    /// assert_eq!(
    ///     config.source.path().to_str(),
    ///     Some("/var/log/spark_driver_logs.txt")
    /// );
    /// ```
    pub fn driver(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            prefix: String::new(),
            source: LogSource::DriverFile(PathBuf::from(DEFAULT_DRIVER_LOG_FILE)),
            interval_secs: DEFAULT_INTERVAL_SECS,
        }
    }

    /// エグゼキューターログ用の設定をデフォルト値で作成
    pub fn executor(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            prefix: String::new(),
            source: LogSource::ExecutorDir(PathBuf::from(DEFAULT_EXECUTOR_LOG_DIR)),
            interval_secs: DEFAULT_INTERVAL_SECS,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_interval_secs(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    /// Replaces the local path while keeping the source kind.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = match self.source {
            LogSource::DriverFile(_) => LogSource::DriverFile(path.into()),
            LogSource::ExecutorDir(_) => LogSource::ExecutorDir(path.into()),
        };
        self
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// 設定値を検証する
    ///
    /// # Errors
    ///
    /// バケット名が空、または間隔が0の場合にエラーを返す
    pub fn validate(&self) -> Result<()> {
        if self.bucket.trim().is_empty() {
            bail!("bucket must not be empty for {} publisher", self.source.kind());
        }
        if self.interval_secs == 0 {
            bail!(
                "interval_secs must be positive for {} publisher",
                self.source.kind()
            );
        }
        Ok(())
    }
}
