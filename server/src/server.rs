//! axumサーバー起動・シャットダウンハンドリング

use crate::shutdown::ShutdownController;
use crate::store::FixtureStore;
use crate::AppState;
use fixture_api_common::{config::ServerConfig, error::FixtureApiError};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

/// サーバー起動・実行時のエラー
#[derive(Debug, Error)]
pub enum ServerError {
    /// フィクスチャの読み込みに失敗
    #[error("Failed to load fixture store: {0}")]
    Store(#[from] FixtureApiError),

    /// アドレスのバインドに失敗
    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        /// バインド先
        addr: String,
        /// 原因
        #[source]
        source: std::io::Error,
    },

    /// サーバー実行中のI/Oエラー
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// 設定に従ってフィクスチャを読み込み、サーバーを起動する
///
/// フィクスチャの読み込みが完了するまで接続は受け付けない。
pub async fn run(config: ServerConfig, shutdown: ShutdownController) -> Result<(), ServerError> {
    info!("Fixture API v{}", env!("CARGO_PKG_VERSION"));

    let store = FixtureStore::load(&config.db_path).await?;
    let state = AppState::new(store).with_token_env(config.token_env.clone());

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: bind_addr.clone(),
            source,
        })?;

    serve(listener, state, shutdown).await
}

/// バインド済みのリスナーでサーバーを実行する
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: ShutdownController,
) -> Result<(), ServerError> {
    let app = crate::api::create_router(state);

    let addr = listener.local_addr().map_err(ServerError::Serve)?;
    info!("Fixture API server is running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .map_err(ServerError::Serve)?;

    info!("Server shutdown complete");
    Ok(())
}

/// シャットダウンシグナルを待機
async fn shutdown_signal(shutdown: ShutdownController) {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
        _ = shutdown.wait() => {
            info!("Shutdown requested, shutting down...");
        }
    }
}
