use std::path::{Path, PathBuf};

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use fixture_api::{api, store::FixtureStore, AppState};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// テスト用の一時フィクスチャで構築したアプリ
#[allow(dead_code)]
pub struct FixtureApp {
    pub app: Router,
    pub state: AppState,
    pub db_path: PathBuf,
    _dir: TempDir,
}

#[allow(dead_code)]
impl FixtureApp {
    /// ディスク上のフィクスチャを読み直す
    pub fn read_db(&self) -> Value {
        read_db(&self.db_path)
    }
}

/// クレート同梱のフィクスチャ
#[allow(dead_code)]
pub fn bundled_fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/db.json")
}

/// 同梱フィクスチャのコピーでアプリを構築する
#[allow(dead_code)]
pub async fn build_app() -> FixtureApp {
    let db = read_db(&bundled_fixture_path());
    build_app_with(db).await
}

/// 任意のフィクスチャでアプリを構築する
pub async fn build_app_with(db: Value) -> FixtureApp {
    let dir = tempfile::tempdir().expect("create temp dir");
    let db_path = dir.path().join("db.json");
    std::fs::write(&db_path, serde_json::to_vec_pretty(&db).unwrap()).unwrap();

    let store = FixtureStore::load(&db_path)
        .await
        .expect("load fixture store");
    let state = AppState::new(store);
    let app = api::create_router(state.clone());

    FixtureApp {
        app,
        state,
        db_path,
        _dir: dir,
    }
}

#[allow(dead_code)]
pub fn read_db(path: &Path) -> Value {
    serde_json::from_slice(&std::fs::read(path).expect("read fixture")).expect("parse fixture")
}

/// リクエストを1件送り、ステータスと生ボディを返す
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<&Value>,
) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

/// GETしてJSONボディを返す
#[allow(dead_code)]
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = send(app, "GET", uri, None).await;
    (status, serde_json::from_slice(&body).expect("JSON body"))
}
