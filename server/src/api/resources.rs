//! 汎用リソースルーター
//!
//! フィクスチャのトップレベルキーをコレクションとして、
//! `/<collection>` と `/<collection>/:id` をREST形式で公開する

use super::{body::parse_object, error::AppError, render::Rendered};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::Uri,
    Json,
};
use serde_json::{json, Value};
use tracing::{debug, info};

/// GET /db - ストア全体（エンベロープなし）
pub async fn get_db(State(state): State<AppState>) -> Json<Value> {
    Json(state.store.snapshot().await)
}

/// GET /:collection - コレクション全体（`?field=value` で絞り込み）
pub async fn list_records(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Query(filters): Query<Vec<(String, String)>>,
) -> Result<Rendered, AppError> {
    let records = state.store.list(&collection, &filters).await?;
    Ok(Rendered::ok(records))
}

/// GET /:collection/:id
pub async fn get_record(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Rendered, AppError> {
    let record = state.store.get(&collection, &id).await?;
    Ok(Rendered::ok(record))
}

/// POST /:collection
///
/// `data` を持つPOSTは手前の上書きで204になるため、ここに届くのはそれ以外のボディだけ。
pub async fn create_record(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    body: Bytes,
) -> Result<Rendered, AppError> {
    let record = state.store.insert(&collection, parse_object(&body)?).await?;
    info!(collection = %collection, id = %record["id"], "Record created");
    Ok(Rendered::created(record))
}

/// PUT /:collection/:id
pub async fn replace_record(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    body: Bytes,
) -> Result<Rendered, AppError> {
    let record = state
        .store
        .replace(&collection, &id, parse_object(&body)?)
        .await?;
    Ok(Rendered::ok(record))
}

/// PATCH /:collection/:id
pub async fn update_record(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    body: Bytes,
) -> Result<Rendered, AppError> {
    let record = state
        .store
        .update(&collection, &id, parse_object(&body)?)
        .await?;
    Ok(Rendered::ok(record))
}

/// DELETE /:collection/:id
pub async fn delete_record(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Rendered, AppError> {
    state.store.remove(&collection, &id).await?;
    info!(collection = %collection, id = %id, "Record deleted");
    Ok(Rendered::ok(json!({})))
}

/// どのルートにも一致しないリクエスト
pub async fn not_found(uri: Uri) -> Rendered {
    debug!(path = %uri.path(), "No resource matched");
    Rendered::not_found()
}
