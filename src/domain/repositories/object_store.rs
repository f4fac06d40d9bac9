//! # Object Store Trait
//!
//! リモートオブジェクトストアへのアップロードを抽象化

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

#[cfg(test)]
use mockall::automock;

/// オブジェクトストア
///
/// 利用する機能は「ローカルファイルを (bucket, key) へアップロードし、既存キーは上書きする」のみ
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// ローカルファイルをアップロードする
    ///
    /// # Arguments
    ///
    /// * `local_path` - アップロードするファイル
    /// * `bucket` - アップロード先バケット
    /// * `key` - オブジェクトキー
    ///
    /// # Errors
    ///
    /// ファイルの読み込みまたはリモート呼び出しに失敗した場合にエラーを返す
    async fn upload_file(&self, local_path: &Path, bucket: &str, key: &str) -> Result<()>;
}
