//! # Publish Logs Use Case
//!
//! 1ティック分のアップロード（存在すればアップロード）

use anyhow::{Context, Result};
use log::debug;
use std::sync::Arc;

use crate::domain::entities::log_file::LogFile;
use crate::domain::entities::publisher_config::{LogSource, PublisherConfig};
use crate::domain::repositories::log_repository::LogRepository;
use crate::domain::repositories::object_store::ObjectStore;
use crate::domain::services::object_key::ObjectKeyService;

/// 1ティックの結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// アップロードしたオブジェクトキー（アップロード順）
    pub uploaded_keys: Vec<String>,
}

impl TickSummary {
    pub fn uploaded_count(&self) -> usize {
        self.uploaded_keys.len()
    }
}

/// ログ公開ユースケース
///
/// ログソースに現在存在するファイルを全てアップロードする。
/// 差分検出は行わず、毎回無条件に上書きアップロードする
pub struct PublishLogsUseCase<L: LogRepository, S: ObjectStore + ?Sized> {
    log_repository: Arc<L>,
    object_store: Arc<S>,
}

impl<L: LogRepository, S: ObjectStore + ?Sized> PublishLogsUseCase<L, S> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `log_repository` - ログリポジトリ
    /// * `object_store` - アップロード先のオブジェクトストア
    pub fn new(log_repository: Arc<L>, object_store: Arc<S>) -> Self {
        Self {
            log_repository,
            object_store,
        }
    }

    /// Destination key of `file` for the given source kind.
    pub fn object_key(config: &PublisherConfig, file: &LogFile) -> String {
        match &config.source {
            LogSource::DriverFile(_) => ObjectKeyService::driver_key(&config.prefix, &file.path),
            LogSource::ExecutorDir(_) => {
                ObjectKeyService::executor_key(&config.prefix, &file.dir, &file.file_name)
            }
        }
    }

    /// 存在するファイルをアップロードする
    ///
    /// パスが存在しない場合はアップロードせずに空の結果を返す（エラーではない）。
    /// アップロードは順番に行い、最初の失敗で残りを中断する
    ///
    /// # Errors
    ///
    /// ファイルの列挙またはアップロードに失敗した場合にエラーを返す
    pub async fn execute(&self, config: &PublisherConfig) -> Result<TickSummary> {
        let files = self.log_repository.discover(&config.source).await?;

        let mut summary = TickSummary::default();
        for file in files {
            let key = Self::object_key(config, &file);
            debug!(
                "Uploading {} to s3://{}/{}",
                file.path.display(),
                config.bucket,
                key
            );

            self.object_store
                .upload_file(&file.path, &config.bucket, &key)
                .await
                .with_context(|| {
                    format!(
                        "Failed to upload {} to s3://{}/{}",
                        file.path.display(),
                        config.bucket,
                        key
                    )
                })?;

            summary.uploaded_keys.push(key);
        }

        Ok(summary)
    }
}
