//! File Log Repository Implementation
//!
//! LogRepositoryのファイルシステム実装

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::domain::entities::log_file::LogFile;
use crate::domain::entities::publisher_config::LogSource;
use crate::domain::repositories::log_repository::LogRepository;

/// ファイルシステムベースのログリポジトリ
pub struct FileLogRepository;

impl FileLogRepository {
    /// 新しいリポジトリを作成
    pub fn new() -> Self {
        Self
    }

    /// `~` を展開したパスを返す
    pub fn expand_path(path: &Path) -> PathBuf {
        let raw = path.to_string_lossy();
        PathBuf::from(shellexpand::tilde(&raw).into_owned())
    }

    /// ドライバーログファイルを発見する（内部実装）
    fn discover_file_internal(file: &Path) -> Vec<LogFile> {
        let file = Self::expand_path(file);

        if !file.is_file() {
            debug!("Log file does not exist yet: {}", file.display());
            return Vec::new();
        }

        LogFile::from_path(file).into_iter().collect()
    }

    /// エグゼキューターログディレクトリを再帰的に探索する（内部実装）
    ///
    /// 拡張子や更新時刻によるフィルタリングは行わない。
    /// ディレクトリへのシンボリックリンクは辿らないが、ファイルへのリンクは含める
    fn discover_dir_internal(log_dir: &Path) -> Vec<LogFile> {
        let log_dir = Self::expand_path(log_dir);

        if !log_dir.is_dir() {
            debug!("Log directory does not exist yet: {}", log_dir.display());
            return Vec::new();
        }

        let mut log_files = Vec::new();

        for entry in WalkDir::new(&log_dir).into_iter() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", log_dir.display(), e);
                    continue;
                }
            };

            let path = entry.path();
            if entry.file_type().is_symlink() && !path.exists() {
                warn!("Skipping broken symlink: {}", path.display());
                continue;
            }
            if entry.file_type().is_dir() || !path.is_file() {
                continue;
            }

            if let Some(log_file) = LogFile::from_path(path) {
                log_files.push(log_file);
            }
        }

        debug!(
            "Found {} log files in {}",
            log_files.len(),
            log_dir.display()
        );

        log_files
    }
}

#[async_trait]
impl LogRepository for FileLogRepository {
    async fn discover(&self, source: &LogSource) -> Result<Vec<LogFile>> {
        // 非同期なので、tokio::task::spawn_blockingでラップ
        let source = source.clone();
        tokio::task::spawn_blocking(move || match &source {
            LogSource::DriverFile(file) => Self::discover_file_internal(file),
            LogSource::ExecutorDir(dir) => Self::discover_dir_internal(dir),
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))
    }
}

impl Default for FileLogRepository {
    fn default() -> Self {
        Self::new()
    }
}
