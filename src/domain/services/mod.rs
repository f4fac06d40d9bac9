//! # Domain Services
//!
//! 特定のエンティティに属さないビジネスロジック
//!
//! - **ObjectKeyService**: オブジェクトキーの導出

pub mod object_key;
