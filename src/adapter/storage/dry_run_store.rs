//! Dry-run Object Store
//!
//! 実際にはアップロードせず、ログ出力のみ行う

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use std::path::Path;

use crate::domain::repositories::object_store::ObjectStore;

/// `--dry-run` 用のオブジェクトストア
#[derive(Debug, Default, Clone)]
pub struct DryRunObjectStore;

#[async_trait]
impl ObjectStore for DryRunObjectStore {
    async fn upload_file(&self, local_path: &Path, bucket: &str, key: &str) -> Result<()> {
        info!(
            "DRY RUN MODE - Would upload {} to s3://{}/{}",
            local_path.display(),
            bucket,
            key
        );
        Ok(())
    }
}
