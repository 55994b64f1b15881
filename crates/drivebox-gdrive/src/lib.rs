//! drivebox GDrive - Google Drive API client
//!
//! Provides async client for:
//! - OAuth2 authentication (Authorization Code with PKCE)
//! - Remote file listing via the Drive v3 `files.list` endpoint
//! - Single-shot multipart upload via `files.create`
//! - Account profile and storage numbers via `about`
//!
//! ## Modules
//!
//! - [`auth`] - OAuth2 PKCE authentication flow components
//! - [`client`] - Drive API HTTP client
//! - [`files`] - File listing operations
//! - [`upload`] - Multipart upload operation
//! - [`provider`] - `IRemoteFileGateway` implementation

pub mod auth;
pub mod client;
pub mod files;
pub mod provider;
pub mod upload;

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when communicating with the Drive API
#[derive(Debug, Error)]
pub enum DriveError {
    /// Authentication credentials are invalid or expired
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Insufficient permissions for the requested operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded; retry after the specified duration
    #[error("Too many requests, retry after {retry_after:?}")]
    TooManyRequests {
        /// Duration to wait before retrying
        retry_after: Duration,
    },

    /// A server-side error occurred (5xx)
    #[error("Server error: {0}")]
    ServerError(String),

    /// A network-level error occurred
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API response could not be parsed or was malformed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Fallback wait when a 429 response carries no Retry-After header
const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(30);

/// Classifies a non-success response into a [`DriveError`], consuming the body
pub(crate) async fn status_error(response: reqwest::Response) -> anyhow::Error {
    let status = response.status();

    let retry_after = response
        .headers()
        .get("Retry-After")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_RETRY_AFTER);

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unable to read error body".to_string());

    let error = if status == reqwest::StatusCode::UNAUTHORIZED {
        DriveError::Unauthorized(body)
    } else if status == reqwest::StatusCode::FORBIDDEN {
        DriveError::Forbidden(body)
    } else if status == reqwest::StatusCode::NOT_FOUND {
        DriveError::NotFound(body)
    } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        DriveError::TooManyRequests { retry_after }
    } else if status.is_server_error() {
        DriveError::ServerError(format!("{status}: {body}"))
    } else {
        DriveError::InvalidResponse(format!("{status}: {body}"))
    };

    anyhow::Error::new(error)
}

/// Returns the response unchanged on success, or the classified error
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> anyhow::Result<reqwest::Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(status_error(response).await)
    }
}
