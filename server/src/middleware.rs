//! リクエスト前処理ミドルウェア
//!
//! リクエストには次の順で適用される。
//!
//! 1. [`dispatch_actions`]: credentials・create_pull_request は個別ハンドラーへ
//! 2. [`post_override`]: `data` を持つPOSTは204で打ち切る
//! 3. [`rewrite_path`]: アクションパスをリソースパスに書き換える

use crate::api::error::AppError;
use crate::rewrite::RewriteTable;
use axum::{
    body::Body,
    extract::{Request, State},
    http::{uri::PathAndQuery, Method, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
    Router,
};
use fixture_api_common::{error::FixtureApiError, protocol::truthy_data};
use serde_json::Value;
use tower::ServiceExt;
use tracing::{debug, warn};

/// リクエストボディの上限（10MB）
pub const BODY_LIMIT: usize = 10 * 1024 * 1024;

/// 個別ハンドラーへの振り分け
///
/// `GET /update_jobs/:id/credentials` と `POST /update_jobs/:id/create_pull_request` は
/// `actions` で処理する。それ以外のメソッド・パスは汎用処理へ流す。
pub async fn dispatch_actions(
    State(actions): State<Router>,
    request: Request,
    next: Next,
) -> Response {
    if !is_action(request.method(), request.uri().path()) {
        return next.run(request).await;
    }

    match actions.oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    }
}

fn is_action(method: &Method, path: &str) -> bool {
    let segments: Vec<&str> = path.split('/').collect();
    match segments.as_slice() {
        ["", "update_jobs", id, "credentials"] if !id.is_empty() => {
            method == Method::GET || method == Method::HEAD
        }
        ["", "update_jobs", id, "create_pull_request"] if !id.is_empty() => {
            method == Method::POST
        }
        _ => false,
    }
}

/// POST上書き
///
/// ボディがtruthyな `data` フィールドを持つPOSTは、ストアを変更せずに204を返す。
/// それ以外はボディを復元して次へ渡す。
pub async fn post_override(request: Request, next: Next) -> Response {
    if request.method() != Method::POST {
        return next.run(request).await;
    }

    let (parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(err) => {
            return AppError::from(FixtureApiError::InvalidBody(err.to_string())).into_response()
        }
    };

    let has_data = serde_json::from_slice::<Value>(&bytes)
        .map(|body| truthy_data(&body).is_some())
        .unwrap_or(false);
    if has_data {
        debug!(path = %parts.uri.path(), "POST with data short-circuited");
        return StatusCode::NO_CONTENT.into_response();
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

/// パス書き換え
///
/// クエリ文字列は維持する。
pub async fn rewrite_path(
    State(table): State<RewriteTable>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(path) = table.rewrite(request.uri().path()) {
        match rewritten_uri(request.uri(), &path) {
            Ok(uri) => {
                debug!(from = %request.uri(), to = %uri, "Path rewritten");
                *request.uri_mut() = uri;
            }
            Err(err) => warn!(path = %path, "Failed to rewrite request path: {}", err),
        }
    }

    next.run(request).await
}

fn rewritten_uri(original: &Uri, path: &str) -> Result<Uri, axum::http::Error> {
    let path_and_query = match original.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    };

    let mut parts = original.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query)?);
    Ok(Uri::from_parts(parts)?)
}
