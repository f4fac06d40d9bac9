//! Adapter Layer
//!
//! 外部システム（S3, ファイルシステム）との統合

pub mod config;
pub mod repositories;
pub mod storage;
