//! Remote listing and upload snapshot types
//!
//! These are per-request snapshots: a listing is fetched fresh each time and
//! fully replaces whatever was displayed before, and an upload request is
//! built for a single call and discarded afterwards.

use serde::{Deserialize, Serialize};

use super::errors::DomainError;
use super::newtypes::{FileId, PageToken};

/// A single file as reported by the remote listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFileEntry {
    /// Backend-assigned file identifier
    pub id: FileId,
    /// Display name of the file
    pub name: String,
}

/// One page of the remote file listing
///
/// `next_page_token` is `Some` when further pages exist; callers decide
/// whether to follow it.
#[derive(Debug, Clone)]
pub struct FilePage {
    /// Entries on this page, in backend order
    pub entries: Vec<RemoteFileEntry>,
    /// Continuation token for the next page, if any
    pub next_page_token: Option<PageToken>,
}

/// A single-shot upload request
///
/// Constructed transiently for one upload call. The content is the whole
/// file body; chunked and resumable uploads are out of scope.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Name the file will carry in the remote backend
    pub display_name: String,
    /// MIME type of the content
    pub content_type: String,
    /// The file bytes
    pub content: Vec<u8>,
}

impl UploadRequest {
    /// Creates a validated upload request
    ///
    /// # Errors
    /// Returns `DomainError::InvalidDisplayName` for an empty name and
    /// `DomainError::InvalidContentType` for a malformed MIME type
    pub fn new(
        display_name: impl Into<String>,
        content_type: impl Into<String>,
        content: Vec<u8>,
    ) -> Result<Self, DomainError> {
        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(DomainError::InvalidDisplayName(
                "display name cannot be empty".to_string(),
            ));
        }

        let content_type = content_type.into();
        if content_type.is_empty() || !content_type.contains('/') {
            return Err(DomainError::InvalidContentType(content_type));
        }

        Ok(Self {
            display_name,
            content_type,
            content,
        })
    }
}

/// The outcome of a successful upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    /// Identifier the backend assigned to the uploaded file
    pub assigned_id: FileId,
}
