//! Remote file gateway port (driven/secondary port)
//!
//! This module defines the interface for the two network operations of the
//! workflow - listing remote files and uploading a file - plus the account
//! profile query used during session establishment. The primary
//! implementation targets Google Drive, but the trait only assumes a backend
//! with `list(pageSize, fields) -> {entries, nextPageToken?}` and
//! `create(metadata, content, fields) -> {id}` shapes.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because errors at port boundaries are
//!   adapter-specific and don't need domain-level classification.
//! - Uses `#[async_trait]` for async trait methods.
//! - The credential is passed on every call; implementations must not cache
//!   it between calls. This keeps the session explicit rather than ambient.

use crate::domain::listing::{FilePage, UploadRequest, UploadResult};
use crate::domain::newtypes::{PageSize, PageToken};
use crate::domain::session::{AccountProfile, Credential};

/// Port trait for remote file storage operations
///
/// ## Implementation Notes
///
/// - Both operations are network I/O; callers are expected to run them off
///   any latency-sensitive task (see `work::spawn_cancellable`).
/// - Implementations should apply a request timeout; the transport client
///   in the adapter crate defaults to 30 seconds.
#[async_trait::async_trait]
pub trait IRemoteFileGateway: Send + Sync {
    /// Fetches one page of the remote file listing
    ///
    /// # Arguments
    /// * `credential` - The credential authorizing the call
    /// * `page_size` - Maximum number of entries to return
    /// * `page_token` - Continuation token from a previous page (None for
    ///   the first page)
    ///
    /// # Returns
    /// The page entries in backend order, plus a continuation token when
    /// more pages exist
    async fn list_files(
        &self,
        credential: &Credential,
        page_size: PageSize,
        page_token: Option<&PageToken>,
    ) -> anyhow::Result<FilePage>;

    /// Uploads a file in a single request
    ///
    /// Whole-body, non-resumable upload; the request is consumed by the
    /// call.
    ///
    /// # Returns
    /// The identifier the backend assigned to the new file
    async fn upload_file(
        &self,
        credential: &Credential,
        request: UploadRequest,
    ) -> anyhow::Result<UploadResult>;

    /// Retrieves the signed-in account's profile and storage numbers
    async fn fetch_profile(&self, credential: &Credential) -> anyhow::Result<AccountProfile>;
}
