//! 設定管理
//!
//! ServerConfig 設定構造体

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// デフォルトのリッスンポート
pub const DEFAULT_PORT: u16 = 9000;

/// パスワードとして返すトークンの環境変数名
pub const DEFAULT_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Fixture API サーバー設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// ホストアドレス (デフォルト: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// ポート番号 (デフォルト: 9000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// フィクスチャJSONファイルのパス (デフォルト: "db.json")
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// credentialsエンドポイントがパスワードとして返す環境変数名
    /// (デフォルト: "GITHUB_TOKEN")
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_db_path() -> PathBuf {
    PathBuf::from("db.json")
}

fn default_token_env() -> String {
    DEFAULT_TOKEN_ENV.to_string()
}

impl ServerConfig {
    /// `host:port` 形式のバインドアドレス
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            db_path: default_db_path(),
            token_env: default_token_env(),
        }
    }
}
