//! Sign-in use case
//!
//! The OAuth consent flow itself is adapter territory (browser, loopback
//! callback, token exchange); this use case takes the resulting credential
//! and establishes the explicit session object that every subsequent
//! gateway call receives.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::{
    domain::{Credential, DriveSession},
    ports::IRemoteFileGateway,
};

/// Use case for establishing a session from a credential
pub struct SignInUseCase {
    gateway: Arc<dyn IRemoteFileGateway>,
}

impl SignInUseCase {
    /// Creates a new SignInUseCase with the required dependencies
    pub fn new(gateway: Arc<dyn IRemoteFileGateway>) -> Self {
        Self { gateway }
    }

    /// Establishes a session for the given credential
    ///
    /// This method:
    /// 1. Fetches the account profile through the gateway (which also
    ///    proves the credential is usable)
    /// 2. Constructs the `DriveSession` binding profile and credential
    ///
    /// # Errors
    ///
    /// Returns an error if the profile query fails (bad or expired
    /// credential, network failure)
    pub async fn establish(&self, credential: Credential) -> Result<DriveSession> {
        let profile = self
            .gateway
            .fetch_profile(&credential)
            .await
            .context("Failed to retrieve account profile")?;

        Ok(DriveSession::new(profile, credential))
    }
}
