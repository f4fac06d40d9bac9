//! # Log Repository Trait
//!
//! アップロード対象ファイルの発見を抽象化

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::log_file::LogFile;
use crate::domain::entities::publisher_config::LogSource;

/// ログリポジトリ
///
/// ログソースから現在存在するファイルを列挙する
#[async_trait]
pub trait LogRepository: Send + Sync {
    /// ログファイルを発見する
    ///
    /// # Arguments
    ///
    /// * `source` - 監視対象（ドライバーファイルまたはエグゼキューターディレクトリ）
    ///
    /// # Returns
    ///
    /// 発見されたファイルのリスト。パスが存在しない場合は空のリスト
    async fn discover(&self, source: &LogSource) -> Result<Vec<LogFile>>;
}
