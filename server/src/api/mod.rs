//! REST APIハンドラー
//!
//! 個別ハンドラー（credentials、create_pull_request）→ POST上書き →
//! パス書き換え → 汎用リソースルーターの順でリクエストを解決する

pub mod body;
pub mod credentials;
pub mod error;
pub mod pull_requests;
pub mod render;
pub mod resources;

use crate::middleware::{dispatch_actions, post_override, rewrite_path, BODY_LIMIT};
use crate::AppState;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// credentialsエンドポイント
pub const CREDENTIALS_ROUTE: &str = "/update_jobs/:id/credentials";

/// PR作成エンドポイント
pub const CREATE_PULL_REQUEST_ROUTE: &str = "/update_jobs/:id/create_pull_request";

/// APIルーターを作成
pub fn create_router(state: AppState) -> Router {
    // 個別ハンドラーだけのルーター（一致判定は dispatch_actions が行う）
    let actions = Router::new()
        .route(CREDENTIALS_ROUTE, get(credentials::get_credentials))
        .route(
            CREATE_PULL_REQUEST_ROUTE,
            post(pull_requests::create_pull_request),
        )
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(state.clone());

    let resource_router = Router::new()
        .route(
            "/db",
            get(resources::get_db).fallback(resources::not_found),
        )
        .route(
            "/:collection",
            get(resources::list_records)
                .post(resources::create_record)
                .fallback(resources::not_found),
        )
        .route(
            "/:collection/:id",
            get(resources::get_record)
                .put(resources::replace_record)
                .patch(resources::update_record)
                .delete(resources::delete_record)
                .fallback(resources::not_found),
        )
        .fallback(resources::not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(state.clone());

    let app = ServiceBuilder::new()
        .layer(middleware::from_fn_with_state(actions, dispatch_actions))
        .layer(middleware::from_fn(post_override))
        .layer(middleware::from_fn_with_state(
            state.rewrites.clone(),
            rewrite_path,
        ))
        .service(resource_router);

    Router::new()
        .fallback_service(app)
        .layer(TraceLayer::new_for_http())
}
