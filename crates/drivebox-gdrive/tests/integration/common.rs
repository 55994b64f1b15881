//! Shared test helpers for Drive API integration tests
//!
//! Provides wiremock-based mock server setup for Drive v3 endpoints. Each
//! helper mounts the necessary mock endpoints and returns a configured
//! DriveClient pointing at the mock server.

use chrono::{Duration, Utc};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use drivebox_core::domain::Credential;
use drivebox_gdrive::client::DriveClient;

/// A fresh credential for authorizing mock requests.
pub fn test_credential() -> Credential {
    Credential {
        access_token: "test-access-token".to_string(),
        refresh_token: Some("test-refresh-token".to_string()),
        expires_at: Utc::now() + Duration::hours(1),
    }
}

/// Sets up a mock server with the about endpoint and returns
/// a (MockServer, DriveClient) tuple.
///
/// Pre-configured endpoints:
/// - GET /drive/v3/about → user profile + storage quota
pub async fn setup_drive_mock() -> (MockServer, DriveClient) {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/drive/v3/about"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user": {
                "displayName": "Test User",
                "emailAddress": "test@example.com"
            },
            "storageQuota": {
                "limit": "16106127360",
                "usage": "5368709120"
            }
        })))
        .mount(&server)
        .await;

    let client = DriveClient::with_base_url(server.uri()).expect("build client");

    (server, client)
}

/// Mounts a files listing endpoint returning the given files array and
/// optional continuation token.
pub async fn mount_list_page(
    server: &MockServer,
    files: serde_json::Value,
    next_page_token: Option<&str>,
) {
    let mut body = serde_json::json!({ "files": files });
    if let Some(token) = next_page_token {
        body["nextPageToken"] = serde_json::json!(token);
    }

    Mock::given(method("GET"))
        .and(path("/drive/v3/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mounts a multipart upload endpoint that responds with the given id.
pub async fn mount_upload(server: &MockServer, response_id: &str) {
    Mock::given(method("POST"))
        .and(path("/upload/drive/v3/files"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "id": response_id })),
        )
        .mount(server)
        .await;
}
