//! Integration tests for the files listing operation

use drivebox_core::domain::{PageSize, PageToken};
use drivebox_gdrive::client::DriveClient;
use drivebox_gdrive::files;
use drivebox_gdrive::DriveError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common;

#[tokio::test]
async fn test_list_returns_entries_in_order() {
    let (server, client) = common::setup_drive_mock().await;

    common::mount_list_page(
        &server,
        serde_json::json!([
            {"id": "1", "name": "a.txt"},
            {"id": "2", "name": "b.txt"}
        ]),
        None,
    )
    .await;

    let page = files::list_page(
        &client,
        &common::test_credential(),
        PageSize::default(),
        None,
    )
    .await
    .expect("listing failed");

    let names: Vec<&str> = page.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["a.txt", "b.txt"]);
    assert!(page.next_page_token.is_none());
}

#[tokio::test]
async fn test_list_sends_page_size_and_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/drive/v3/files"))
        .and(query_param("pageSize", "10"))
        .and(query_param("fields", "nextPageToken, files(id, name)"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "files": [] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = DriveClient::with_base_url(server.uri()).unwrap();
    let page = files::list_page(
        &client,
        &common::test_credential(),
        PageSize::default(),
        None,
    )
    .await
    .expect("listing failed");

    assert!(page.entries.is_empty());
}

#[tokio::test]
async fn test_list_respects_page_size_cap() {
    let (server, client) = common::setup_drive_mock().await;

    // The backend enforces pageSize; ten entries for a pageSize=10 request
    let files_json: Vec<serde_json::Value> = (0..10)
        .map(|i| serde_json::json!({"id": format!("id{i}"), "name": format!("f{i}.txt")}))
        .collect();
    common::mount_list_page(&server, serde_json::json!(files_json), Some("more")).await;

    let page = files::list_page(
        &client,
        &common::test_credential(),
        PageSize::new(10).unwrap(),
        None,
    )
    .await
    .expect("listing failed");

    assert!(page.entries.len() <= 10);
    assert_eq!(page.next_page_token.as_ref().unwrap().as_str(), "more");
}

#[tokio::test]
async fn test_list_forwards_page_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/drive/v3/files"))
        .and(query_param("pageToken", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "files": [{"id": "3", "name": "c.txt"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = DriveClient::with_base_url(server.uri()).unwrap();
    let token = PageToken::new("page-2".to_string()).unwrap();

    let page = files::list_page(
        &client,
        &common::test_credential(),
        PageSize::default(),
        Some(&token),
    )
    .await
    .expect("listing failed");

    assert_eq!(page.entries.len(), 1);
    assert_eq!(page.entries[0].name, "c.txt");
}

#[tokio::test]
async fn test_list_missing_files_field_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/drive/v3/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = DriveClient::with_base_url(server.uri()).unwrap();
    let page = files::list_page(
        &client,
        &common::test_credential(),
        PageSize::default(),
        None,
    )
    .await
    .expect("listing failed");

    assert!(page.entries.is_empty());
}

#[tokio::test]
async fn test_list_unauthorized_classified() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/drive/v3/files"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {"code": 401, "message": "Invalid Credentials"}
        })))
        .mount(&server)
        .await;

    let client = DriveClient::with_base_url(server.uri()).unwrap();
    let result = files::list_page(
        &client,
        &common::test_credential(),
        PageSize::default(),
        None,
    )
    .await;

    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DriveError>(),
        Some(DriveError::Unauthorized(_))
    ));
}

#[tokio::test]
async fn test_list_sends_bearer_token() {
    let (server, client) = common::setup_drive_mock().await;
    common::mount_list_page(&server, serde_json::json!([]), None).await;

    files::list_page(
        &client,
        &common::test_credential(),
        PageSize::default(),
        None,
    )
    .await
    .expect("listing failed");

    let requests = server.received_requests().await.unwrap();
    let listing = requests
        .iter()
        .find(|r| r.url.path() == "/drive/v3/files")
        .expect("no listing request recorded");
    assert_eq!(
        listing
            .headers
            .get("authorization")
            .unwrap()
            .to_str()
            .unwrap(),
        "Bearer test-access-token"
    );
}
