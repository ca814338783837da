mod common;

use axum::http::StatusCode;
use common::{TestApp, body_json, json_request};
use hotel_admin::{
    MockStorageService,
    models::{PresignedUrlResponse, Role},
};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn presigned_url_is_scoped_to_business_unit() {
    let app = TestApp::new();
    let staff = app.user_with(&[("biz_1", Role::Staff)]).await;

    let response = app
        .send(json_request(
            "POST",
            "/biz_1/admin/uploads/presigned",
            Some(staff),
            json!({ "filename": "lobby.PNG", "file_type": "image/png" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: PresignedUrlResponse = body_json(response).await;
    assert!(body.resource_key.starts_with("biz_1/uploads/"));
    assert!(body.resource_key.ends_with(".png"));
    assert!(body.upload_url.contains(&body.resource_key));
}

#[tokio::test]
async fn non_image_upload_is_rejected() {
    let app = TestApp::new();
    let owner = app.user_with(&[("biz_1", Role::Owner)]).await;

    let response = app
        .send(json_request(
            "POST",
            "/biz_1/admin/uploads/presigned",
            Some(owner),
            json!({ "filename": "script.sh", "file_type": "text/x-shellscript" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn storage_outage_is_bad_gateway() {
    let app = TestApp::with_storage(Arc::new(MockStorageService::new_failing()));
    let owner = app.user_with(&[("biz_1", Role::Owner)]).await;

    let response = app
        .send(json_request(
            "POST",
            "/biz_1/admin/uploads/presigned",
            Some(owner),
            json!({ "filename": "pool.jpg", "file_type": "image/jpeg" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn uploads_for_foreign_unit_are_not_found() {
    let app = TestApp::new();
    let owner = app.user_with(&[("biz_1", Role::Owner)]).await;

    let response = app
        .send(json_request(
            "POST",
            "/biz_2/admin/uploads/presigned",
            Some(owner),
            json!({ "filename": "pool.jpg", "file_type": "image/jpeg" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
