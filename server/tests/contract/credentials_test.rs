//! Contract Test: GET /update_jobs/:id/credentials
//!
//! フィクスチャの内容に関係なく、GITHUB_TOKEN をパスワードとして返す

use axum::http::StatusCode;
use serde_json::{json, Value};
use serial_test::serial;

use crate::support::fixture::{build_app, build_app_with, get_json, send};

/// 正常系: GITHUB_TOKEN がパスワードになる
#[tokio::test]
#[serial]
async fn test_credentials_echo_github_token() {
    std::env::set_var("GITHUB_TOKEN", "ghs_contract_token");
    let fixture = build_app().await;

    let (status, body) = get_json(&fixture.app, "/update_jobs/1/credentials").await;
    std::env::remove_var("GITHUB_TOKEN");

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "data": {
                "attributes": {
                    "credentials": {
                        "type": "git_source",
                        "host": "github.com",
                        "username": "x-access-token",
                        "password": "ghs_contract_token"
                    }
                }
            }
        })
    );
}

/// 未設定でもエラーにならず、パスワードが省略される
#[tokio::test]
#[serial]
async fn test_credentials_without_token() {
    std::env::remove_var("GITHUB_TOKEN");
    let fixture = build_app().await;

    let (status, body) = get_json(&fixture.app, "/update_jobs/1/credentials").await;

    assert_eq!(status, StatusCode::OK);
    let credentials = &body["data"]["attributes"]["credentials"];
    assert_eq!(credentials["username"], "x-access-token");
    assert!(credentials.get("password").is_none());
}

/// 空文字のトークンは空文字のまま返す
#[tokio::test]
#[serial]
async fn test_credentials_with_empty_token() {
    std::env::set_var("GITHUB_TOKEN", "");
    let fixture = build_app().await;

    let (status, body) = get_json(&fixture.app, "/update_jobs/1/credentials").await;
    std::env::remove_var("GITHUB_TOKEN");

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["attributes"]["credentials"]["password"], "");
}

/// トークンはリクエストごとに読み直す
#[tokio::test]
#[serial]
async fn test_credentials_read_token_per_request() {
    let fixture = build_app().await;

    std::env::set_var("GITHUB_TOKEN", "first");
    let (_, first) = get_json(&fixture.app, "/update_jobs/1/credentials").await;
    std::env::set_var("GITHUB_TOKEN", "second");
    let (_, second) = get_json(&fixture.app, "/update_jobs/1/credentials").await;
    std::env::remove_var("GITHUB_TOKEN");

    assert_eq!(first["data"]["attributes"]["credentials"]["password"], "first");
    assert_eq!(second["data"]["attributes"]["credentials"]["password"], "second");
}

/// 未知のIDや空のフィクスチャでも200
#[tokio::test]
#[serial]
async fn test_credentials_ignore_fixture_contents() {
    let fixture = build_app_with(json!({})).await;

    for path in ["/update_jobs/1/credentials", "/update_jobs/999/credentials"] {
        let (status, body) = get_json(&fixture.app, path).await;
        assert_eq!(status, StatusCode::OK, "GET {path}");
        assert_eq!(
            body["data"]["attributes"]["credentials"]["type"],
            Value::from("git_source")
        );
    }
}

/// GET以外はcredentialsハンドラーを通らない
#[tokio::test]
async fn test_non_get_falls_through_to_generic_handling() {
    let fixture = build_app().await;

    let (status, body) = send(
        &fixture.app,
        "POST",
        "/update_jobs/1/credentials",
        Some(&json!({"data": {"token": "x"}})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    // data なしのPOSTは /credentials/1 に書き換えられ、POSTルートが無いので404
    let (status, _) = send(
        &fixture.app,
        "POST",
        "/update_jobs/1/credentials",
        Some(&json!({"token": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// GET以外は /credentials/:id に書き換えられ、フィクスチャのレコードを操作する
#[tokio::test]
async fn test_non_get_methods_rewrite_to_credentials_collection() {
    let fixture = build_app().await;

    let (status, body) = send(
        &fixture.app,
        "PATCH",
        "/update_jobs/1/credentials",
        Some(&json!({"x": 1})),
    )
    .await;
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"data": {"id": 1, "attributes": {"id": 1, "credentials": [], "x": 1}}})
    );
    assert_eq!(fixture.read_db()["credentials"][0]["x"], 1);

    let (status, body) = send(
        &fixture.app,
        "PUT",
        "/update_jobs/1/credentials",
        Some(&json!({"credentials": [{"host": "example.com"}]})),
    )
    .await;
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["attributes"],
        json!({"credentials": [{"host": "example.com"}], "id": 1})
    );

    let (status, _) = send(&fixture.app, "DELETE", "/update_jobs/1/credentials", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fixture.read_db()["credentials"], json!([]));

    let (status, _) = send(&fixture.app, "PATCH", "/update_jobs/9/credentials", Some(&json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
