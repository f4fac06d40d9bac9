//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **PublishLogsUseCase**: 1ティック分のログアップロード

pub mod publish_logs;
