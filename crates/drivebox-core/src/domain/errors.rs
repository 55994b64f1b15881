//! Domain error types
//!
//! This module defines error types specific to domain operations,
//! including validation failures and workflow preconditions.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid remote file identifier format
    #[error("Invalid file ID: {0}")]
    InvalidFileId(String),

    /// Invalid page token
    #[error("Invalid page token: {0}")]
    InvalidPageToken(String),

    /// Page size outside the accepted range
    #[error("Invalid page size: {0} (expected 1..=1000)")]
    InvalidPageSize(u32),

    /// Invalid email address format
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    /// Invalid upload display name
    #[error("Invalid display name: {0}")]
    InvalidDisplayName(String),

    /// Invalid MIME content type
    #[error("Invalid content type: {0}")]
    InvalidContentType(String),

    /// Local file-read permission was denied or the source is unreadable
    #[error("Local source is not readable: {0}")]
    PermissionDenied(String),

    /// Another upload already holds the upload slot
    #[error("An upload is already in progress")]
    UploadInProgress,

    /// Generic validation failure
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}
