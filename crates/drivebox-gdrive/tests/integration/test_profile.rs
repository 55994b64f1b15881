//! Integration tests for the account profile (about) query

use drivebox_gdrive::client::DriveClient;
use drivebox_gdrive::DriveError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common;

#[tokio::test]
async fn test_fetch_profile_parses_user_and_quota() {
    let (_server, client) = common::setup_drive_mock().await;

    let profile = client
        .fetch_profile(&common::test_credential())
        .await
        .expect("profile fetch failed");

    assert_eq!(profile.email.as_str(), "test@example.com");
    assert_eq!(profile.display_name, "Test User");
    assert_eq!(profile.storage_used, 5_368_709_120);
    assert_eq!(profile.storage_limit, 16_106_127_360);
}

#[tokio::test]
async fn test_fetch_profile_without_quota() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/drive/v3/about"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user": {
                "displayName": "No Quota",
                "emailAddress": "noquota@example.com"
            }
        })))
        .mount(&server)
        .await;

    let client = DriveClient::with_base_url(server.uri()).unwrap();
    let profile = client
        .fetch_profile(&common::test_credential())
        .await
        .expect("profile fetch failed");

    assert_eq!(profile.storage_used, 0);
    assert_eq!(profile.storage_limit, 0);
}

#[tokio::test]
async fn test_fetch_profile_unlimited_storage() {
    let server = MockServer::start().await;

    // Accounts without an enforced limit omit the `limit` field
    Mock::given(method("GET"))
        .and(path("/drive/v3/about"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user": {
                "displayName": "Unlimited",
                "emailAddress": "unlimited@example.com"
            },
            "storageQuota": {
                "usage": "123456789"
            }
        })))
        .mount(&server)
        .await;

    let client = DriveClient::with_base_url(server.uri()).unwrap();
    let profile = client
        .fetch_profile(&common::test_credential())
        .await
        .expect("profile fetch failed");

    assert_eq!(profile.storage_used, 123_456_789);
    assert_eq!(profile.storage_limit, 0);
    assert!((profile.storage_percent() - 0.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_fetch_profile_expired_token_classified() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/drive/v3/about"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {"code": 401, "message": "Invalid Credentials"}
        })))
        .mount(&server)
        .await;

    let client = DriveClient::with_base_url(server.uri()).unwrap();
    let result = client.fetch_profile(&common::test_credential()).await;

    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DriveError>(),
        Some(DriveError::Unauthorized(_))
    ));
}
