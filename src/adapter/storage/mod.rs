//! Object Store Adapters
//!
//! ObjectStoreトレイトの実装

pub mod dry_run_store;
pub mod error;
pub mod s3_store;
