//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use super::render::Rendered;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fixture_api_common::error::{CommonError, FixtureApiError};
use serde_json::json;
use tracing::{debug, error};

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub FixtureApiError);

impl From<FixtureApiError> for AppError {
    fn from(err: FixtureApiError) -> Self {
        AppError(err)
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            FixtureApiError::CollectionNotFound(_) | FixtureApiError::RecordNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            FixtureApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            FixtureApiError::DuplicateId { .. } => StatusCode::CONFLICT,
            FixtureApiError::Common(CommonError::Serialization(_)) => StatusCode::BAD_REQUEST,
            FixtureApiError::Common(_)
            | FixtureApiError::InvalidFixture(_)
            | FixtureApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // 404はリソースルーターの通常レスポンスと同じくエンベロープで返す
        if self.0.is_not_found() {
            debug!("{}", self.0);
            return Rendered::not_found().into_response();
        }

        let status = self.status();
        if status.is_server_error() {
            error!("{}", self.0);
        } else {
            debug!("{}", self.0);
        }

        let payload = json!({
            "error": self.0.to_string()
        });

        (status, Json(payload)).into_response()
    }
}
