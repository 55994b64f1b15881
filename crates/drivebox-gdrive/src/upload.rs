//! Upload operation for the Drive v3 API
//!
//! Single-shot `multipart/related` upload via
//! `POST /upload/drive/v3/files?uploadType=multipart&fields=id`: a JSON
//! metadata part carrying the display name, followed by the media part with
//! the file bytes. Chunked/resumable uploads are out of scope.
//!
//! reqwest's multipart builder produces `multipart/form-data`, which this
//! endpoint rejects, so the related body is assembled by hand.

use anyhow::{Context, Result};
use drivebox_core::domain::{Credential, FileId, UploadRequest, UploadResult};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::Deserialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::client::DriveClient;
use crate::ensure_success;

/// Upload endpoint path (under the /upload prefix of the API host)
const UPLOAD_PATH: &str = "/upload/drive/v3/files";

/// Response from a successful multipart upload (`fields=id`)
#[derive(Debug, Deserialize)]
struct CreatedFileResponse {
    /// Drive-assigned id of the new file
    id: String,
}

/// Assembles a `multipart/related` body from a metadata JSON document and
/// the media bytes
///
/// Layout per part: delimiter, part headers, blank line, part body. The
/// closing delimiter carries the trailing double dash.
pub(crate) fn build_related_body(
    metadata_json: &str,
    content_type: &str,
    content: &[u8],
    boundary: &str,
) -> Vec<u8> {
    let mut body = Vec::with_capacity(metadata_json.len() + content.len() + 256);

    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata_json}\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!("--{boundary}\r\nContent-Type: {content_type}\r\n\r\n").as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    body
}

/// Uploads a file in a single multipart request
///
/// # Arguments
/// * `client` - The Drive API client
/// * `credential` - The credential authorizing the call
/// * `request` - The validated upload request
///
/// # Returns
/// An [`UploadResult`] carrying the id the backend assigned
///
/// # Errors
/// Returns an error if the upload request fails or the response cannot be
/// parsed; nothing is retried
pub async fn upload_multipart(
    client: &DriveClient,
    credential: &Credential,
    request: &UploadRequest,
) -> Result<UploadResult> {
    let boundary = format!("drivebox-{}", Uuid::new_v4().simple());
    let metadata = serde_json::json!({ "name": request.display_name }).to_string();
    let body = build_related_body(&metadata, &request.content_type, &request.content, &boundary);

    debug!(
        name = %request.display_name,
        content_type = %request.content_type,
        size = request.content.len(),
        "Uploading file"
    );

    let response = client
        .request(Method::POST, UPLOAD_PATH, credential)
        .query(&[("uploadType", "multipart"), ("fields", "id")])
        .header(
            CONTENT_TYPE,
            format!("multipart/related; boundary={boundary}"),
        )
        .body(body)
        .send()
        .await
        .context("Failed to send upload request")?;

    let created: CreatedFileResponse = ensure_success(response)
        .await
        .context("Upload returned error status")?
        .json()
        .await
        .context("Failed to parse upload response")?;

    let assigned_id =
        FileId::new(created.id).context("Upload response contained an invalid file id")?;

    info!(id = %assigned_id, name = %request.display_name, "File uploaded");
    Ok(UploadResult { assigned_id })
}
