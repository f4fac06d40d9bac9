//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **PublisherConfig**: パブリッシャーの設定
//! - **LogFile**: アップロード対象のファイル

pub mod log_file;
pub mod publisher_config;
