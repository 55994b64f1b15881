//! Integration tests for the multipart upload operation

use drivebox_core::domain::UploadRequest;
use drivebox_gdrive::client::DriveClient;
use drivebox_gdrive::upload;
use drivebox_gdrive::DriveError;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common;

fn request(name: &str, content: &[u8]) -> UploadRequest {
    UploadRequest::new(name, "application/octet-stream", content.to_vec()).unwrap()
}

#[tokio::test]
async fn test_upload_returns_assigned_id() {
    let (server, client) = common::setup_drive_mock().await;
    common::mount_upload(&server, "1newfile").await;

    let result = upload::upload_multipart(
        &client,
        &common::test_credential(),
        &request("notes.txt", b"hello"),
    )
    .await
    .expect("upload failed");

    assert_eq!(result.assigned_id.as_str(), "1newfile");
    assert!(!result.assigned_id.as_str().is_empty());
}

#[tokio::test]
async fn test_upload_sends_multipart_query_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload/drive/v3/files"))
        .and(query_param("uploadType", "multipart"))
        .and(query_param("fields", "id"))
        .and(body_string_contains("\"name\":\"notes.txt\""))
        .and(body_string_contains("hello payload"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "1abc" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = DriveClient::with_base_url(server.uri()).unwrap();
    upload::upload_multipart(
        &client,
        &common::test_credential(),
        &request("notes.txt", b"hello payload"),
    )
    .await
    .expect("upload failed");
}

#[tokio::test]
async fn test_upload_content_type_is_multipart_related() {
    let (server, client) = common::setup_drive_mock().await;
    common::mount_upload(&server, "1abc").await;

    upload::upload_multipart(
        &client,
        &common::test_credential(),
        &request("a.bin", &[1, 2, 3]),
    )
    .await
    .expect("upload failed");

    let requests = server.received_requests().await.unwrap();
    let upload_req = requests
        .iter()
        .find(|r| r.url.path() == "/upload/drive/v3/files")
        .expect("no upload request recorded");

    let content_type = upload_req
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("multipart/related; boundary="));
}

#[tokio::test]
async fn test_upload_forbidden_classified() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload/drive/v3/files"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "error": {"code": 403, "message": "The user has not granted the app access"}
        })))
        .mount(&server)
        .await;

    let client = DriveClient::with_base_url(server.uri()).unwrap();
    let result = upload::upload_multipart(
        &client,
        &common::test_credential(),
        &request("denied.txt", b"content"),
    )
    .await;

    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DriveError>(),
        Some(DriveError::Forbidden(_))
    ));
}

#[tokio::test]
async fn test_upload_server_error_classified() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload/drive/v3/files"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend unavailable"))
        .mount(&server)
        .await;

    let client = DriveClient::with_base_url(server.uri()).unwrap();
    let result = upload::upload_multipart(
        &client,
        &common::test_credential(),
        &request("fail.txt", b"content"),
    )
    .await;

    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DriveError>(),
        Some(DriveError::ServerError(_))
    ));
}

#[tokio::test]
async fn test_upload_empty_file() {
    let (server, client) = common::setup_drive_mock().await;
    common::mount_upload(&server, "1empty").await;

    let result = upload::upload_multipart(
        &client,
        &common::test_credential(),
        &request("empty.bin", &[]),
    )
    .await
    .expect("upload failed");

    assert_eq!(result.assigned_id.as_str(), "1empty");
}
