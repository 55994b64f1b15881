//! File listing operations for the Drive v3 API
//!
//! A single page per call; pagination is the caller's decision. The request
//! mirrors the upstream shape: `files.list` with a `pageSize` and the
//! `nextPageToken, files(id, name)` field selector.

use anyhow::{Context, Result};
use drivebox_core::domain::{Credential, FileId, FilePage, PageSize, PageToken, RemoteFileEntry};
use reqwest::Method;
use serde::Deserialize;
use tracing::debug;

use crate::client::DriveClient;
use crate::ensure_success;

/// Field selector for the listing query
const LIST_FIELDS: &str = "nextPageToken, files(id, name)";

// ============================================================================
// Drive API response types
// ============================================================================

/// Response from the /drive/v3/files endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileListResponse {
    /// Files on this page
    files: Option<Vec<DriveFile>>,
    /// Continuation token (absent on the last page)
    next_page_token: Option<String>,
}

/// A single file in a listing response
#[derive(Debug, Deserialize)]
struct DriveFile {
    /// Drive-assigned file id
    id: Option<String>,
    /// Display name
    name: Option<String>,
}

/// Converts a listing response file into the domain entry
fn file_to_entry(file: DriveFile) -> Result<RemoteFileEntry> {
    let id = file
        .id
        .context("Listing response file is missing its id")?;
    let id = FileId::new(id).context("Listing response contained an invalid file id")?;
    let name = file.name.unwrap_or_default();
    Ok(RemoteFileEntry { id, name })
}

// ============================================================================
// list_page
// ============================================================================

/// Fetches one page of the remote file listing
///
/// Makes `GET /drive/v3/files?pageSize=N&fields=nextPageToken, files(id, name)`
/// with the continuation token appended when present.
///
/// # Arguments
/// * `client` - The Drive API client
/// * `credential` - The credential authorizing the call
/// * `page_size` - Maximum number of entries to return
/// * `page_token` - Continuation token from a previous page
///
/// # Returns
/// A [`FilePage`] with at most `page_size` entries in backend order
pub async fn list_page(
    client: &DriveClient,
    credential: &Credential,
    page_size: PageSize,
    page_token: Option<&PageToken>,
) -> Result<FilePage> {
    debug!(page_size = page_size.get(), has_token = page_token.is_some(), "Listing files");

    let mut request = client
        .request(Method::GET, "/drive/v3/files", credential)
        .query(&[
            ("pageSize", page_size.get().to_string()),
            ("fields", LIST_FIELDS.to_string()),
        ]);

    if let Some(token) = page_token {
        request = request.query(&[("pageToken", token.as_str())]);
    }

    let response = request
        .send()
        .await
        .context("Failed to send listing request")?;

    let list: FileListResponse = ensure_success(response)
        .await
        .context("Listing request returned error status")?
        .json()
        .await
        .context("Failed to parse listing response")?;

    let entries = list
        .files
        .unwrap_or_default()
        .into_iter()
        .map(file_to_entry)
        .collect::<Result<Vec<_>>>()?;

    let next_page_token = list
        .next_page_token
        .map(PageToken::new)
        .transpose()
        .context("Listing response contained an invalid page token")?;

    debug!(entries = entries.len(), more = next_page_token.is_some(), "Listing page fetched");

    Ok(FilePage {
        entries,
        next_page_token,
    })
}
