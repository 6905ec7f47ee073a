//! Fixture API Server
//!
//! 依存関係アップデートジョブAPIの代わりにフィクスチャデータを返すモックサーバー

#![warn(missing_docs)]

/// REST APIハンドラー
pub mod api;

/// CLIインターフェース
pub mod cli;

/// ロギング初期化ユーティリティ
pub mod logging;

/// リクエスト前処理（POST上書き・パス書き換え）
pub mod middleware;

/// パス書き換えテーブル
pub mod rewrite;

/// axumサーバー起動・シャットダウンハンドリング
pub mod server;

/// シャットダウン制御
pub mod shutdown;

/// フィクスチャストア
pub mod store;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// フィクスチャストア
    pub store: store::FixtureStore,
    /// パス書き換えテーブル
    pub rewrites: rewrite::RewriteTable,
    /// credentialsのパスワードとして返す環境変数名
    pub token_env: String,
}

impl AppState {
    /// デフォルトの書き換えテーブルと `GITHUB_TOKEN` で状態を作成
    pub fn new(store: store::FixtureStore) -> Self {
        Self {
            store,
            rewrites: rewrite::RewriteTable::update_jobs(),
            token_env: fixture_api_common::config::DEFAULT_TOKEN_ENV.to_string(),
        }
    }

    /// パスワードに使う環境変数名を差し替える
    pub fn with_token_env(mut self, token_env: impl Into<String>) -> Self {
        self.token_env = token_env.into();
        self
    }
}
