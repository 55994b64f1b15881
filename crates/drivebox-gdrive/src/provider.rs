//! GoogleDriveGateway - IRemoteFileGateway implementation for the Drive API
//!
//! Wraps the [`DriveClient`] and delegates to the files and upload modules
//! to fulfil the [`IRemoteFileGateway`] port contract.
//!
//! ## Design Notes
//!
//! - Authentication (`login`, `refresh`) is handled separately by
//!   `DriveAuthAdapter`; this gateway focuses on file operations.
//! - The client holds no per-session state, so no interior mutability is
//!   needed: the credential arrives with every call.

use anyhow::Result;
use tracing::debug;

use drivebox_core::domain::{
    AccountProfile, Credential, FilePage, PageSize, PageToken, UploadRequest, UploadResult,
};
use drivebox_core::ports::IRemoteFileGateway;

use crate::client::DriveClient;
use crate::files;
use crate::upload;

/// Remote file gateway backed by the Google Drive v3 API
pub struct GoogleDriveGateway {
    client: DriveClient,
}

impl GoogleDriveGateway {
    /// Creates a new `GoogleDriveGateway` wrapping the given [`DriveClient`]
    pub fn new(client: DriveClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl IRemoteFileGateway for GoogleDriveGateway {
    /// Fetches one page of the remote file listing
    ///
    /// Delegates to [`files::list_page`].
    async fn list_files(
        &self,
        credential: &Credential,
        page_size: PageSize,
        page_token: Option<&PageToken>,
    ) -> Result<FilePage> {
        debug!(
            page_size = page_size.get(),
            has_token = page_token.is_some(),
            "GoogleDriveGateway::list_files"
        );
        files::list_page(&self.client, credential, page_size, page_token).await
    }

    /// Uploads a file in a single multipart request
    ///
    /// Delegates to [`upload::upload_multipart`].
    async fn upload_file(
        &self,
        credential: &Credential,
        request: UploadRequest,
    ) -> Result<UploadResult> {
        debug!(
            name = %request.display_name,
            size = request.content.len(),
            "GoogleDriveGateway::upload_file"
        );
        upload::upload_multipart(&self.client, credential, &request).await
    }

    /// Retrieves the signed-in account's profile
    ///
    /// Delegates to [`DriveClient::fetch_profile`].
    async fn fetch_profile(&self, credential: &Credential) -> Result<AccountProfile> {
        debug!("GoogleDriveGateway::fetch_profile");
        self.client.fetch_profile(credential).await
    }
}
