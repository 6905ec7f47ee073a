//! CLI module for fixture-api
//!
//! コマンドライン引数をサーバー設定に変換する。

use clap::Parser;
use fixture_api_common::config::{ServerConfig, DEFAULT_PORT, DEFAULT_TOKEN_ENV};
use std::path::PathBuf;

/// Fixture API - fixture-backed stand-in for the dependency update job API
#[derive(Parser, Debug)]
#[command(name = "fixture-api")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    FIXTURE_API_PORT         Listen port (default: 9000)
    FIXTURE_API_HOST         Bind address (default: 0.0.0.0)
    FIXTURE_API_DB           Fixture database file
    FIXTURE_API_LOG_LEVEL    Log level (default: info, RUST_LOG takes precedence)
    GITHUB_TOKEN             Password returned by /update_jobs/:id/credentials
"#)]
pub struct Cli {
    /// Listen port
    #[arg(default_value_t = DEFAULT_PORT, env = "FIXTURE_API_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "FIXTURE_API_HOST")]
    pub host: String,

    /// Fixture database file (rewritten on every write)
    #[arg(short, long, env = "FIXTURE_API_DB", default_value_os_t = default_db_path())]
    pub db: PathBuf,

    /// Environment variable echoed as the git credentials password
    #[arg(long, default_value = DEFAULT_TOKEN_ENV)]
    pub token_env: String,

    /// Log level
    #[arg(long, default_value = "info", env = "FIXTURE_API_LOG_LEVEL")]
    pub log_level: String,
}

/// クレートに同梱しているフィクスチャ
pub fn default_db_path() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/db.json"))
}

impl Cli {
    /// サーバー設定に変換
    pub fn into_config(self) -> ServerConfig {
        ServerConfig {
            host: self.host,
            port: self.port,
            db_path: self.db,
            token_env: self.token_env,
        }
    }
}
