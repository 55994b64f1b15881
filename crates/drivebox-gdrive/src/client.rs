//! Google Drive API client
//!
//! Provides a typed HTTP client for the Drive v3 REST API. Handles base URL
//! construction, per-request bearer authentication, and the account profile
//! query. The credential is passed into every request rather than stored on
//! the client, so a single client can serve any session.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use drivebox_gdrive::client::DriveClient;
//! # use drivebox_core::domain::Credential;
//!
//! # async fn example(credential: &Credential) -> anyhow::Result<()> {
//! let client = DriveClient::new()?;
//! let profile = client.fetch_profile(credential).await?;
//! println!("Hello, {}", profile.display_name);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use anyhow::{Context, Result};
use drivebox_core::domain::{AccountProfile, Credential, Email};
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::ensure_success;

/// Base URL for the Google APIs host (both `/drive/v3` and `/upload/drive/v3`
/// live under it)
const DRIVE_BASE_URL: &str = "https://www.googleapis.com";

/// Default per-request timeout; the upstream client had none, this one does
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Field selector for the `about` query
const ABOUT_FIELDS: &str = "user(displayName,emailAddress),storageQuota(limit,usage)";

// ============================================================================
// Drive API response types
// ============================================================================

/// Response from the /drive/v3/about endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AboutResponse {
    /// The signed-in user
    user: Option<AboutUser>,
    /// Storage quota numbers
    storage_quota: Option<StorageQuota>,
}

/// User block of the about response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AboutUser {
    /// User's display name
    display_name: Option<String>,
    /// User's email address
    email_address: Option<String>,
}

/// Storage quota block of the about response
///
/// The Drive API serializes these int64 values as JSON strings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StorageQuota {
    /// Total storage in bytes (absent for unlimited accounts)
    limit: Option<String>,
    /// Used storage in bytes
    usage: Option<String>,
}

impl StorageQuota {
    fn parse_bytes(value: Option<&str>) -> u64 {
        value.and_then(|s| s.parse().ok()).unwrap_or(0)
    }
}

// ============================================================================
// DriveClient
// ============================================================================

/// HTTP client for Drive API calls
///
/// Wraps `reqwest::Client` with base URL construction and per-request
/// bearer authentication from an explicitly passed [`Credential`].
pub struct DriveClient {
    /// The underlying HTTP client
    client: Client,
    /// Base URL for API requests
    base_url: String,
}

impl DriveClient {
    /// Creates a new DriveClient with the default 30-second request timeout
    ///
    /// # Errors
    /// Returns an error if the TLS backend cannot be initialized
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a new DriveClient with a custom request timeout
    ///
    /// # Arguments
    /// * `timeout` - Per-request timeout applied to every call
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: DRIVE_BASE_URL.to_string(),
        })
    }

    /// Creates a new DriveClient with a custom base URL (useful for testing)
    ///
    /// # Arguments
    /// * `base_url` - Custom base URL for API requests
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Creates an authenticated request builder for the given method and path
    ///
    /// Automatically prepends the base URL and adds the Authorization header
    /// from the passed credential.
    ///
    /// # Arguments
    /// * `method` - HTTP method (GET, POST, ...)
    /// * `path` - API path relative to base URL (e.g., "/drive/v3/files")
    /// * `credential` - The credential authorizing this request
    pub fn request(
        &self,
        method: Method,
        path: &str,
        credential: &Credential,
    ) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, &url)
            .bearer_auth(&credential.access_token)
    }

    /// Retrieves the signed-in account's profile and storage numbers
    ///
    /// Makes `GET /drive/v3/about` with a field selector for the user block
    /// and storage quota.
    ///
    /// # Returns
    /// An [`AccountProfile`] with email, display name and quota data
    pub async fn fetch_profile(&self, credential: &Credential) -> Result<AccountProfile> {
        debug!("Fetching account profile from /drive/v3/about");

        let response = self
            .request(Method::GET, "/drive/v3/about", credential)
            .query(&[("fields", ABOUT_FIELDS)])
            .send()
            .await
            .context("Failed to fetch /drive/v3/about")?;

        let about: AboutResponse = ensure_success(response)
            .await
            .context("GET /drive/v3/about returned error status")?
            .json()
            .await
            .context("Failed to parse about response")?;

        let user = about.user.unwrap_or(AboutUser {
            display_name: None,
            email_address: None,
        });

        let email = Email::new(
            user.email_address
                .unwrap_or_else(|| "unknown@unknown.com".to_string()),
        )
        .context("Invalid email address in about response")?;

        let display_name = user
            .display_name
            .unwrap_or_else(|| "Unknown User".to_string());

        let (storage_used, storage_limit) = match about.storage_quota {
            Some(quota) => (
                StorageQuota::parse_bytes(quota.usage.as_deref()),
                StorageQuota::parse_bytes(quota.limit.as_deref()),
            ),
            None => {
                warn!("About response carried no storage quota");
                (0, 0)
            }
        };

        debug!(
            email = %email,
            storage_used,
            storage_limit,
            "Fetched account profile"
        );

        Ok(AccountProfile {
            email,
            display_name,
            storage_used,
            storage_limit,
        })
    }

    /// Returns the base URL for API requests
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
