//! CLI command implementations

pub mod auth;
pub mod completions;
pub mod config;
pub mod ls;
pub mod upload;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use drivebox_core::config::Config;
use drivebox_core::domain::DriveSession;
use drivebox_core::ports::IRemoteFileGateway;
use drivebox_core::usecases::SignInUseCase;
use drivebox_gdrive::auth::{DriveAuthAdapter, KeyringTokenStorage};
use drivebox_gdrive::client::DriveClient;
use drivebox_gdrive::provider::GoogleDriveGateway;
use tracing::info;

/// A session plus the gateway it was established through
pub(crate) struct SessionContext {
    pub session: DriveSession,
    pub gateway: Arc<dyn IRemoteFileGateway>,
}

/// Builds the Drive gateway from the configured transport settings
pub(crate) fn build_gateway(config: &Config) -> Result<Arc<dyn IRemoteFileGateway>> {
    let client = DriveClient::with_timeout(Duration::from_secs(config.http.timeout_secs))?;
    Ok(Arc::new(GoogleDriveGateway::new(client)))
}

/// Establishes a session from the stored credential
///
/// Loads the credential from the keyring, refreshes it when it is within
/// five minutes of expiry (re-storing the refreshed credential), then runs
/// `SignInUseCase::establish` to bind the account profile. The session is
/// passed to every subsequent gateway call; nothing is held globally.
pub(crate) async fn establish_session(config: &Config) -> Result<SessionContext> {
    let mut credential = KeyringTokenStorage::load()
        .context("Failed to read stored credential")?
        .context("Not signed in. Run 'drivebox auth login' first")?;

    if credential.expires_within(chrono::Duration::minutes(5)) {
        let refresh_token = credential
            .refresh_token
            .clone()
            .context("Credential expired and no refresh token is available; sign in again")?;

        let client_id = config
            .auth
            .client_id
            .clone()
            .context("Credential expired and no client_id is configured; sign in again")?;

        info!("Stored credential is expiring; refreshing");
        let adapter = DriveAuthAdapter::with_client_id(client_id);
        credential = adapter
            .refresh(&refresh_token)
            .await
            .context("Failed to refresh expired credential")?;
        KeyringTokenStorage::store(&credential)
            .context("Failed to store refreshed credential")?;
    }

    let gateway = build_gateway(config)?;
    let session = SignInUseCase::new(Arc::clone(&gateway))
        .establish(credential)
        .await
        .context("Failed to establish session")?;

    Ok(SessionContext { session, gateway })
}
