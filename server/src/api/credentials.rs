//! credentials APIハンドラー
//!
//! フィクスチャを参照せず、環境変数のトークンをgit_source credentialsとして返す

use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use fixture_api_common::protocol::{CredentialsAttributes, Envelope, GitSourceCredentials};
use tracing::debug;

/// GET /update_jobs/:id/credentials
///
/// トークンはリクエストごとに読み直す。未設定なら `password` を省略する。
pub async fn get_credentials(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Envelope<CredentialsAttributes>> {
    let password = std::env::var(&state.token_env).ok();
    debug!(
        update_job_id = %id,
        token_env = %state.token_env,
        has_password = password.is_some(),
        "Serving git_source credentials"
    );

    Json(Envelope::attributes(CredentialsAttributes {
        credentials: GitSourceCredentials::github(password),
    }))
}
