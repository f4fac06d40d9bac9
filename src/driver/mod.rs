//! # Driver Layer (Presentation)
//!
//! CLIやその他の外部インターフェースを提供
//!
//! ## 構成要素
//!
//! - **cli**: CLI引数のパース
//! - **workflow**: パブリッシャーの組み立てとライフサイクル管理

pub mod cli;
pub mod workflow;

pub use cli::Args;
pub use workflow::LogShippingWorkflow;
