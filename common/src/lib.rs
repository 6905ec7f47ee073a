//! Fixture API Common
//!
//! サーバー・テストで共有する型定義（設定、エラー、通信プロトコル）

#![warn(missing_docs)]

/// 設定管理
pub mod config;

/// エラー型定義
pub mod error;

/// レスポンスエンベロープ・リクエストペイロード
pub mod protocol;
