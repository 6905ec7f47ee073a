//! Contract Test: POST上書き
//!
//! create_pull_request 以外で `data` を持つPOSTは204を返し、ストアを変更しない

use axum::http::StatusCode;
use serde_json::json;

use crate::support::fixture::{build_app, send};

/// アクションパスへのPOSTは204で、フィクスチャは変わらない
#[tokio::test]
async fn test_action_posts_return_204() {
    let fixture = build_app().await;
    let before = fixture.read_db();

    let paths = [
        "/update_jobs/1/record_update_job_error",
        "/update_jobs/1/update_dependency_list",
        "/update_jobs/1/record_package_manager_version",
        "/update_jobs/1/mark_as_processed",
        "/update_jobs/1/increment_metric",
    ];

    for path in paths {
        let (status, body) = send(
            &fixture.app,
            "POST",
            path,
            Some(&json!({"data": {"error-type": "unknown_error"}})),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT, "POST {path}");
        assert!(body.is_empty(), "POST {path}");
    }

    assert_eq!(fixture.read_db(), before);
}

/// コレクションへの `data` 付きPOSTも追記されない
#[tokio::test]
async fn test_collection_post_with_data_is_not_persisted() {
    let fixture = build_app().await;

    let (status, _) = send(
        &fixture.app,
        "POST",
        "/update_jobs",
        Some(&json!({"data": {"package-manager": "cargo"}})),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(
        fixture
            .state
            .store
            .list("update_jobs", &[])
            .await
            .unwrap()
            .as_array()
            .unwrap()
            .len(),
        1
    );
}

/// falsyな `data` は上書きの対象外
#[tokio::test]
async fn test_falsy_data_is_not_overridden() {
    let fixture = build_app().await;

    let (status, _) = send(
        &fixture.app,
        "POST",
        "/dependencies",
        Some(&json!({"data": null, "name": "rack"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(fixture.read_db()["dependencies"].as_array().unwrap().len(), 2);
}

/// POST以外は上書きされない
#[tokio::test]
async fn test_patch_with_data_reaches_router() {
    let fixture = build_app().await;

    let (status, _) = send(
        &fixture.app,
        "PATCH",
        "/update_jobs/1/mark_as_processed",
        Some(&json!({"data": {"base-commit-sha": "1c6331732c41e4557a16dacb82534f1d1c831848"}})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        fixture.read_db()["update_jobs"][0]["data"]["base-commit-sha"],
        "1c6331732c41e4557a16dacb82534f1d1c831848"
    );
}
