//! Session and account profile types
//!
//! A `DriveSession` is constructed once per sign-in and passed explicitly to
//! every gateway call. Neither the credential nor the session is ever held as
//! ambient shared state; callers own the session and thread it through.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::newtypes::Email;

// ============================================================================
// Credential
// ============================================================================

/// OAuth tokens received from the identity provider
///
/// Contains the access token for API requests, an optional refresh token
/// for obtaining new access tokens, and the expiration time. Serializable
/// so it can be stored in the OS keyring between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    /// Bearer token for authenticating API requests
    pub access_token: String,
    /// Token for refreshing the access token without user interaction
    pub refresh_token: Option<String>,
    /// When the access token expires
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    /// Returns true if the access token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Returns true if the access token will expire within the given duration
    pub fn expires_within(&self, duration: chrono::Duration) -> bool {
        Utc::now() + duration >= self.expires_at
    }
}

// ============================================================================
// AccountProfile
// ============================================================================

/// Information about the signed-in account
///
/// Retrieved from the storage backend's `about` endpoint during session
/// establishment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProfile {
    /// Account email address
    pub email: Email,
    /// Display name from the account profile
    pub display_name: String,
    /// Storage bytes currently used
    pub storage_used: u64,
    /// Total storage bytes available (0 if unlimited or unknown)
    pub storage_limit: u64,
}

impl AccountProfile {
    /// Percentage of storage used, 0.0 when the limit is unknown
    pub fn storage_percent(&self) -> f64 {
        if self.storage_limit == 0 {
            return 0.0;
        }
        (self.storage_used as f64 / self.storage_limit as f64) * 100.0
    }
}

// ============================================================================
// DriveSession
// ============================================================================

/// An established sign-in session
///
/// Binds a validated account profile to the credential that produced it.
/// Created by `SignInUseCase::establish`; invalidated implicitly when the
/// credential expires or the user signs out.
#[derive(Debug, Clone)]
pub struct DriveSession {
    profile: AccountProfile,
    credential: Credential,
    established_at: DateTime<Utc>,
}

impl DriveSession {
    /// Creates a session from a profile and the credential used to fetch it
    pub fn new(profile: AccountProfile, credential: Credential) -> Self {
        Self {
            profile,
            credential,
            established_at: Utc::now(),
        }
    }

    /// Returns the account profile
    pub fn profile(&self) -> &AccountProfile {
        &self.profile
    }

    /// Returns the credential backing this session
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Returns when the session was established
    pub fn established_at(&self) -> DateTime<Utc> {
        self.established_at
    }

    /// Returns true if the backing credential has expired
    pub fn is_expired(&self) -> bool {
        self.credential.is_expired()
    }
}
