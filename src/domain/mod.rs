//! # Domain Layer
//!
//! このモジュールはビジネスの核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - 外部依存を持たない（Rust標準ライブラリと最小限の依存のみ）
//! - オブジェクトストアやファイルシステムについて何も知らない
//!
//! ## 構成要素
//!
//! - **entities**: パブリッシャー設定、アップロード対象ファイル
//! - **repositories**: Repository trait（インターフェース定義のみ）
//! - **services**: Domain Service（オブジェクトキーの導出）

pub mod entities;
pub mod repositories;
pub mod services;
