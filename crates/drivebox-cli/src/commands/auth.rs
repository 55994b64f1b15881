//! Auth commands - Login, Logout, and Status for Google Drive authentication
//!
//! Provides the `drivebox auth` CLI subcommands which:
//! 1. `login`  - Runs the OAuth2 PKCE flow via DriveAuthAdapter, stores the
//!    credential in the system keyring, and shows the account profile.
//! 2. `logout` - Clears the credential from the keyring.
//! 3. `status` - Shows the stored credential's validity without network access.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Subcommand;
use drivebox_core::config::Config;
use drivebox_core::usecases::SignInUseCase;
use drivebox_gdrive::auth::{DriveAuthAdapter, KeyringTokenStorage};
use tracing::info;

use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Authenticate with Google Drive via OAuth2
    Login {
        /// Custom OAuth client ID
        #[arg(long)]
        client_id: Option<String>,
    },
    /// Remove the stored credential
    Logout,
    /// Check authentication status
    Status,
}

impl AuthCommand {
    pub async fn execute(&self, format: OutputFormat, config: &Config) -> Result<()> {
        match self {
            AuthCommand::Login { client_id } => {
                self.execute_login(client_id.as_deref(), format, config).await
            }
            AuthCommand::Logout => self.execute_logout(format).await,
            AuthCommand::Status => self.execute_status(format).await,
        }
    }

    /// Execute the login flow:
    /// 1. Resolve the client_id (flag overrides config)
    /// 2. Run OAuth2 PKCE via DriveAuthAdapter
    /// 3. Establish a session (fetches the account profile)
    /// 4. Store the credential in the keyring
    /// 5. Display the account and storage numbers
    async fn execute_login(
        &self,
        cli_client_id: Option<&str>,
        format: OutputFormat,
        config: &Config,
    ) -> Result<()> {
        let fmt = get_formatter(format.is_json());

        // Step 1: Resolve client_id
        let client_id = cli_client_id
            .map(|s| s.to_string())
            .or_else(|| config.auth.client_id.clone())
            .context(
                "No client_id provided. Use --client-id or set auth.client_id in config.yaml",
            )?;

        info!(client_id = %client_id, "Starting OAuth2 login");

        // Step 2: Run OAuth2 PKCE flow
        fmt.info("Opening browser for Google sign-in...");
        let adapter = DriveAuthAdapter::with_client_id(&client_id);
        let credential = adapter.login().await.context("OAuth2 login failed")?;

        // Step 3: Establish the session, proving the credential works
        fmt.info("Retrieving account information...");
        let gateway = super::build_gateway(config)?;
        let session = SignInUseCase::new(Arc::clone(&gateway))
            .establish(credential)
            .await
            .context("Failed to establish session after login")?;

        // Step 4: Store the credential for later invocations
        KeyringTokenStorage::store(session.credential())
            .context("Failed to store credential in keyring")?;

        // Step 5: Display results
        let profile = session.profile();
        fmt.success(&format!(
            "Authenticated as {} ({})",
            profile.display_name, profile.email
        ));

        let used_mb = profile.storage_used as f64 / 1_048_576.0;
        let limit_gb = profile.storage_limit as f64 / 1_073_741_824.0;
        fmt.info(&format!(
            "Storage: {:.1} MB used / {:.1} GB total ({:.1}%)",
            used_mb,
            limit_gb,
            profile.storage_percent()
        ));

        if format.is_json() {
            fmt.print_json(&serde_json::json!({
                "email": profile.email.as_str(),
                "display_name": profile.display_name,
                "storage_used": profile.storage_used,
                "storage_limit": profile.storage_limit,
            }));
        }

        Ok(())
    }

    /// Execute logout: clear the keyring slot
    async fn execute_logout(&self, format: OutputFormat) -> Result<()> {
        let fmt = get_formatter(format.is_json());

        KeyringTokenStorage::clear().context("Failed to clear credential from keyring")?;

        fmt.success("Logged out successfully");
        fmt.info("Credential removed from keyring");
        Ok(())
    }

    /// Execute status check: report the stored credential's validity
    ///
    /// Deliberately local-only; no network call is made.
    async fn execute_status(&self, format: OutputFormat) -> Result<()> {
        let fmt = get_formatter(format.is_json());

        let credential = KeyringTokenStorage::load().context("Failed to read keyring")?;

        let credential = match credential {
            Some(c) => c,
            None => {
                if format.is_json() {
                    fmt.print_json(&serde_json::json!({ "authenticated": false }));
                } else {
                    fmt.info("Authentication status: Not signed in");
                    fmt.info("Run 'drivebox auth login' to authenticate");
                }
                return Ok(());
            }
        };

        let token_status = if credential.is_expired() {
            "Expired"
        } else {
            "Valid"
        };

        if format.is_json() {
            fmt.print_json(&serde_json::json!({
                "authenticated": true,
                "token_status": token_status,
                "expires_at": credential.expires_at.to_rfc3339(),
                "has_refresh_token": credential.refresh_token.is_some(),
            }));
        } else {
            fmt.success("Credential present in keyring");
            fmt.info(&format!("Token status: {}", token_status));
            fmt.info(&format!(
                "Expires at:   {}",
                credential.expires_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));
            if credential.refresh_token.is_none() {
                fmt.warn("No refresh token stored; sign in again when the token expires");
            }
        }

        Ok(())
    }
}
