//! End-to-end tests through the IRemoteFileGateway port implementation
//!
//! Exercises the same workflow the use cases run: establish a session from
//! a credential, list the remote files, upload a local payload.

use std::sync::Arc;

use drivebox_core::domain::PageSize;
use drivebox_core::ports::IRemoteFileGateway;
use drivebox_core::usecases::{ListFilesUseCase, SignInUseCase};
use drivebox_gdrive::provider::GoogleDriveGateway;

use crate::common;

#[tokio::test]
async fn test_sign_in_then_list_two_files() {
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

    let gateway: Arc<dyn IRemoteFileGateway> = Arc::new(GoogleDriveGateway::new(client));

    let session = SignInUseCase::new(Arc::clone(&gateway))
        .establish(common::test_credential())
        .await
        .expect("sign-in failed");
    assert_eq!(session.profile().display_name, "Test User");

    let entries = ListFilesUseCase::new(gateway)
        .all_pages(&session, PageSize::default())
        .await
        .expect("listing failed");

    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["a.txt", "b.txt"]);
}

#[tokio::test]
async fn test_gateway_upload_roundtrip() {
    let (server, client) = common::setup_drive_mock().await;
    common::mount_upload(&server, "1assigned").await;

    let gateway = GoogleDriveGateway::new(client);

    let request = drivebox_core::domain::UploadRequest::new(
        "picked.bin",
        "application/octet-stream",
        vec![7u8; 64],
    )
    .unwrap();

    let result = gateway
        .upload_file(&common::test_credential(), request)
        .await
        .expect("upload failed");

    assert_eq!(result.assigned_id.as_str(), "1assigned");
}
