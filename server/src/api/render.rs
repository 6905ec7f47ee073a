//! レスポンス整形
//!
//! 汎用リソースルーターのレスポンスはすべて
//! `{ "data": { "id"?, "attributes" } }` に包んで返す。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fixture_api_common::protocol::Envelope;
use serde_json::Value;

/// エンベロープで包まれるレスポンス
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    status: StatusCode,
    body: Envelope,
}

impl Rendered {
    /// 200 OK
    pub fn ok(data: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: Envelope::wrap(data),
        }
    }

    /// 201 Created
    pub fn created(data: Value) -> Self {
        Self {
            status: StatusCode::CREATED,
            body: Envelope::wrap(data),
        }
    }

    /// 404 Not Found（空オブジェクトを包む）
    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: Envelope::empty(),
        }
    }
}

impl IntoResponse for Rendered {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
