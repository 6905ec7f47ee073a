//! プルリクエスト記録APIハンドラー

use super::{body::parse_json, error::AppError};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde_json::{json, Map, Value};
use tracing::info;

/// プルリクエストを記録するコレクション
pub const PULL_REQUESTS: &str = "pull_requests";

/// POST /update_jobs/:id/create_pull_request
///
/// ボディの `data` にパスの `:id` を加えたレコードを `pull_requests` に追記する。
/// 同じIDでも置き換えずに追記する。
pub async fn create_pull_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let body = parse_json(&body)?;

    // data が無い・オブジェクトでない場合はIDだけのレコードになる
    let mut record = match body.get("data") {
        Some(Value::Object(data)) => data.clone(),
        _ => Map::new(),
    };
    record.insert("id".to_string(), Value::String(id.clone()));

    state.store.push(PULL_REQUESTS, record).await?;
    info!(update_job_id = %id, "Pull request recorded");

    Ok(Json(json!({})))
}
