//! ロギング初期化
//!
//! `RUST_LOG` が設定されていればそれを優先し、なければ指定レベルを使う。

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// デフォルトのログレベル
pub const DEFAULT_LEVEL: &str = "info";

/// ログフィルタを組み立てる
pub fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// グローバルsubscriberを初期化する
pub fn init(level: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(filter(level))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init()
}
