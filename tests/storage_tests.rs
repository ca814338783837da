use hotel_admin::{
    error::StorageError,
    storage::{MockStorageService, S3StorageClient, StorageService},
};

#[tokio::test]
async fn mock_returns_url_for_sanitized_key() {
    let storage = MockStorageService::new();
    let url = storage
        .get_presigned_upload_url("biz_1/../biz_2/uploads/a.jpg", "image/jpeg")
        .await
        .unwrap();
    assert_eq!(
        url,
        "http://localhost:9000/mock-bucket/biz_1/biz_2/uploads/a.jpg?signature=fake"
    );
}

#[tokio::test]
async fn failing_mock_reports_request_error() {
    let storage = MockStorageService::new_failing();
    let result = storage.get_presigned_upload_url("biz_1/uploads/a.jpg", "image/png").await;
    assert!(matches!(result, Err(StorageError::Request(_))));
}

#[tokio::test]
async fn s3_client_presigns_without_network() {
    // Presigning is a local computation; no request reaches the endpoint.
    let client = S3StorageClient::new(
        "http://localhost:9000",
        "us-east-1",
        "admin",
        "password",
        "hotel-test",
    );
    let url = client
        .get_presigned_upload_url("biz_1/uploads/room.jpg", "image/jpeg")
        .await
        .unwrap();

    assert!(url.starts_with("http://localhost:9000/hotel-test/biz_1/uploads/room.jpg?"));
    assert!(url.contains("X-Amz-Signature="));
    assert!(url.contains("X-Amz-Expires=600"));
}
