//! OAuth2 PKCE authentication flow for Google Drive
//!
//! Implements the Authorization Code flow with PKCE (RFC 7636) for
//! authenticating native desktop applications with Google's identity
//! platform, requesting the `drive.file` scope ("manage files created by
//! this app").
//!
//! ## Components
//!
//! - [`OAuthConfig`] - Configuration for the OAuth2 flow
//! - [`KeyringTokenStorage`] - Secure credential storage using the system keyring
//! - [`PkceFlow`] - OAuth2 PKCE challenge/exchange logic
//! - [`LocalCallbackServer`] - Minimal HTTP server for the OAuth redirect
//! - [`DriveAuthAdapter`] - Orchestrates the full authentication flow

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use drivebox_core::domain::Credential;
use oauth2::{
    basic::BasicClient, AuthUrl, AuthorizationCode, ClientId, CsrfToken, EndpointNotSet,
    EndpointSet, PkceCodeChallenge, PkceCodeVerifier, RedirectUrl, RefreshToken, Scope,
    TokenResponse, TokenUrl,
};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Google OAuth2 authorization endpoint
const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Google OAuth2 token endpoint
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Default redirect URI for the local callback server
const REDIRECT_URI: &str = "http://127.0.0.1:8418/callback";

/// Keyring service name for storing the credential
const KEYRING_SERVICE: &str = "drivebox";

/// Keyring username for the single credential slot (multi-account is out of
/// scope)
const KEYRING_ACCOUNT: &str = "oauth";

/// Default OAuth2 scopes: files created or opened by the app only
const DEFAULT_SCOPES: &[&str] = &["https://www.googleapis.com/auth/drive.file"];

// ============================================================================
// AuthError
// ============================================================================

/// Sign-in failures surfaced to the caller
#[derive(Debug, Error)]
pub enum AuthError {
    /// The user denied consent or cancelled the flow
    ///
    /// Carries the provider's opaque error code (e.g. `access_denied`).
    #[error("Sign-in denied or cancelled (provider code: {code})")]
    ConsentDenied {
        /// Opaque error code from the provider
        code: String,
    },

    /// The redirect arrived without an authorization code
    #[error("Callback did not include an authorization code")]
    MissingAuthorizationCode,
}

// ============================================================================
// OAuthConfig
// ============================================================================

/// Configuration for the OAuth2 PKCE authentication flow
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    /// OAuth client ID from the Google Cloud console
    pub client_id: String,
    /// Redirect URI for receiving the authorization code
    pub redirect_uri: String,
    /// OAuth scopes to request
    pub scopes: Vec<String>,
}

impl OAuthConfig {
    /// Creates a new OAuthConfig with the given client_id and default settings
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            redirect_uri: REDIRECT_URI.to_string(),
            scopes: DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Creates a config with custom scopes
    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    /// Creates a config with a custom redirect URI
    pub fn with_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uri = uri.into();
        self
    }
}

// ============================================================================
// KeyringTokenStorage
// ============================================================================

/// Stores and retrieves the credential from the system keyring
///
/// Uses the `keyring` crate to store the credential securely in the OS
/// credential store (e.g., GNOME Keyring, KDE Wallet). The credential is
/// serialized as JSON under the service name "drivebox" in a single slot.
pub struct KeyringTokenStorage;

impl KeyringTokenStorage {
    /// Stores the credential in the system keyring
    pub fn store(credential: &Credential) -> Result<()> {
        let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_ACCOUNT)
            .context("Failed to create keyring entry")?;

        let json = serde_json::to_string(credential).context("Failed to serialize credential")?;

        entry
            .set_password(&json)
            .context("Failed to store credential in keyring")?;

        debug!("Stored credential in keyring");
        Ok(())
    }

    /// Loads the credential from the system keyring
    ///
    /// # Returns
    /// `Some(Credential)` if found and valid, `None` if not found
    pub fn load() -> Result<Option<Credential>> {
        let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_ACCOUNT)
            .context("Failed to create keyring entry")?;

        match entry.get_password() {
            Ok(json) => {
                let credential: Credential = serde_json::from_str(&json)
                    .context("Failed to deserialize credential from keyring")?;
                debug!("Loaded credential from keyring");
                Ok(Some(credential))
            }
            Err(keyring::Error::NoEntry) => {
                debug!("No credential found in keyring");
                Ok(None)
            }
            Err(e) => Err(anyhow::Error::new(e).context("Failed to read from keyring")),
        }
    }

    /// Removes the credential from the system keyring
    pub fn clear() -> Result<()> {
        let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_ACCOUNT)
            .context("Failed to create keyring entry")?;

        match entry.delete_credential() {
            Ok(()) => {
                info!("Cleared credential from keyring");
                Ok(())
            }
            Err(keyring::Error::NoEntry) => {
                debug!("No credential to clear");
                Ok(())
            }
            Err(e) => Err(anyhow::Error::new(e).context("Failed to delete from keyring")),
        }
    }
}

// ============================================================================
// PkceFlow
// ============================================================================

/// OAuth2 PKCE flow implementation using the `oauth2` crate
///
/// Handles generating authorization URLs with PKCE challenges,
/// exchanging authorization codes for tokens, and refreshing tokens.
pub struct PkceFlow {
    client: BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>,
    scopes: Vec<String>,
}

impl PkceFlow {
    /// Creates a new PkceFlow with the given configuration
    pub fn new(config: &OAuthConfig) -> Result<Self> {
        let client = BasicClient::new(ClientId::new(config.client_id.clone()))
            .set_auth_uri(AuthUrl::new(AUTH_URL.to_string()).context("Invalid authorization URL")?)
            .set_token_uri(TokenUrl::new(TOKEN_URL.to_string()).context("Invalid token URL")?)
            .set_redirect_uri(
                RedirectUrl::new(config.redirect_uri.clone()).context("Invalid redirect URI")?,
            );

        Ok(Self {
            client,
            scopes: config.scopes.clone(),
        })
    }

    /// Generates an authorization URL with a PKCE challenge
    ///
    /// Requests offline access so Google issues a refresh token alongside
    /// the access token.
    ///
    /// # Returns
    /// A tuple of `(authorization_url, csrf_token, pkce_verifier)`.
    /// The `pkce_verifier` must be kept until the code exchange step.
    pub fn generate_auth_url(&self) -> (String, CsrfToken, PkceCodeVerifier) {
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let mut auth_request = self
            .client
            .authorize_url(CsrfToken::new_random)
            .add_extra_param("access_type", "offline")
            .add_extra_param("prompt", "consent");

        for scope in &self.scopes {
            auth_request = auth_request.add_scope(Scope::new(scope.clone()));
        }

        let (auth_url, csrf_token) = auth_request.set_pkce_challenge(pkce_challenge).url();

        debug!("Generated authorization URL");
        (auth_url.to_string(), csrf_token, pkce_verifier)
    }

    /// Exchanges an authorization code for a credential
    ///
    /// # Arguments
    /// * `code` - The authorization code received from the callback
    /// * `pkce_verifier` - The PKCE verifier generated alongside the auth URL
    pub async fn exchange_code(
        &self,
        code: String,
        pkce_verifier: PkceCodeVerifier,
    ) -> Result<Credential> {
        info!("Exchanging authorization code for tokens");

        let http_client = reqwest::Client::new();
        let token_result = self
            .client
            .exchange_code(AuthorizationCode::new(code))
            .set_pkce_verifier(pkce_verifier)
            .request_async(&http_client)
            .await
            .context("Failed to exchange authorization code")?;

        let expires_at = token_result
            .expires_in()
            .map(|d| Utc::now() + Duration::seconds(d.as_secs() as i64))
            .unwrap_or_else(|| Utc::now() + Duration::hours(1));

        let credential = Credential {
            access_token: token_result.access_token().secret().to_string(),
            refresh_token: token_result.refresh_token().map(|t| t.secret().to_string()),
            expires_at,
        };

        info!("Successfully obtained OAuth tokens");
        Ok(credential)
    }

    /// Refreshes an expired access token using a refresh token
    ///
    /// Google does not reissue the refresh token on refresh, so the old one
    /// is carried forward.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<Credential> {
        info!("Refreshing access token");

        let http_client = reqwest::Client::new();
        let token_result = self
            .client
            .exchange_refresh_token(&RefreshToken::new(refresh_token.to_string()))
            .request_async(&http_client)
            .await
            .context("Failed to refresh token")?;

        let expires_at = token_result
            .expires_in()
            .map(|d| Utc::now() + Duration::seconds(d.as_secs() as i64))
            .unwrap_or_else(|| Utc::now() + Duration::hours(1));

        let credential = Credential {
            access_token: token_result.access_token().secret().to_string(),
            refresh_token: token_result
                .refresh_token()
                .map(|t| t.secret().to_string())
                .or_else(|| Some(refresh_token.to_string())),
            expires_at,
        };

        info!("Successfully refreshed access token");
        Ok(credential)
    }
}

// ============================================================================
// LocalCallbackServer
// ============================================================================

/// Minimal HTTP server that listens on localhost for the OAuth2 redirect callback.
///
/// Starts an HTTP server on `127.0.0.1:8418` that waits for the OAuth provider
/// to redirect the user's browser back with an authorization code. Once the
/// redirect is received, it responds with a result HTML page and shuts down.
pub struct LocalCallbackServer;

/// Parameters extracted from a successful OAuth2 callback
#[derive(Debug)]
pub struct CallbackParams {
    /// The authorization code
    pub code: String,
    /// The CSRF state parameter
    pub state: String,
}

impl LocalCallbackServer {
    /// Starts the local callback server and waits for the OAuth redirect
    ///
    /// # Returns
    /// The callback parameters on success; `AuthError::ConsentDenied` when
    /// the provider redirected back with an error code instead
    pub async fn start() -> Result<CallbackParams> {
        use http_body_util::Full;
        use hyper::body::Bytes;
        use hyper::server::conn::http1;
        use hyper::service::service_fn;
        use hyper::{Request, Response, StatusCode};
        use hyper_util::rt::TokioIo;
        use tokio::net::TcpListener;
        use tokio::sync::oneshot;

        info!("Starting local OAuth callback server on 127.0.0.1:8418");

        let listener = TcpListener::bind("127.0.0.1:8418")
            .await
            .context("Failed to bind callback server to 127.0.0.1:8418")?;

        let (tx, rx) = oneshot::channel::<Result<CallbackParams, AuthError>>();
        let tx = std::sync::Arc::new(tokio::sync::Mutex::new(Some(tx)));

        // Accept a single connection
        let (stream, _addr) = listener
            .accept()
            .await
            .context("Failed to accept connection on callback server")?;

        let io = TokioIo::new(stream);
        let tx_clone = tx.clone();

        let service = service_fn(move |req: Request<hyper::body::Incoming>| {
            let tx_inner = tx_clone.clone();
            async move {
                let uri = req.uri().to_string();
                debug!("Callback server received request: {}", uri);

                let outcome = parse_callback_params(&uri);

                let (status, html) = match &outcome {
                    Ok(_) => (StatusCode::OK, success_html()),
                    Err(AuthError::ConsentDenied { code }) => (
                        StatusCode::OK,
                        error_html(&format!("Sign-in was denied ({code})")),
                    ),
                    Err(e) => (StatusCode::BAD_REQUEST, error_html(&e.to_string())),
                };

                if let Some(sender) = tx_inner.lock().await.take() {
                    let _ = sender.send(outcome);
                }

                Ok::<_, hyper::Error>(
                    Response::builder()
                        .status(status)
                        .header("Content-Type", "text/html; charset=utf-8")
                        .body(Full::new(Bytes::from(html)))
                        .unwrap(),
                )
            }
        });

        // Serve the single connection
        tokio::spawn(async move {
            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                warn!("Callback server connection error: {}", e);
            }
        });

        // Wait for the callback outcome
        let outcome = rx
            .await
            .context("Callback server channel closed without receiving parameters")?;

        match outcome {
            Ok(params) => {
                info!("Received OAuth callback with authorization code");
                Ok(params)
            }
            Err(e) => {
                warn!("OAuth callback reported failure: {}", e);
                Err(e.into())
            }
        }
    }
}

/// Parses the authorization code and state from a callback URI
///
/// A redirect carrying an `error` query parameter (consent denied, flow
/// cancelled) maps to `AuthError::ConsentDenied` with the provider's code.
fn parse_callback_params(uri: &str) -> Result<CallbackParams, AuthError> {
    let url = url::Url::parse(&format!("http://localhost{}", uri))
        .map_err(|_| AuthError::MissingAuthorizationCode)?;

    let mut code = None;
    let mut state = None;
    let mut error = None;

    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "code" => code = Some(value.to_string()),
            "state" => state = Some(value.to_string()),
            "error" => error = Some(value.to_string()),
            _ => {}
        }
    }

    if let Some(provider_code) = error {
        return Err(AuthError::ConsentDenied {
            code: provider_code,
        });
    }

    Ok(CallbackParams {
        code: code.ok_or(AuthError::MissingAuthorizationCode)?,
        state: state.unwrap_or_default(),
    })
}

/// Returns the HTML for a successful authentication page
fn success_html() -> String {
    r#"<!DOCTYPE html>
<html>
<head><title>drivebox - Authentication Successful</title></head>
<body style="font-family: sans-serif; text-align: center; padding-top: 50px;">
    <h1>Authentication Successful</h1>
    <p>You have been signed in with Google Drive.</p>
    <p>You can close this window and return to drivebox.</p>
    <script>setTimeout(function() { window.close(); }, 3000);</script>
</body>
</html>"#
        .to_string()
}

/// Returns the HTML for an authentication error page
fn error_html(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>drivebox - Authentication Error</title></head>
<body style="font-family: sans-serif; text-align: center; padding-top: 50px;">
    <h1>Authentication Error</h1>
    <p>{}</p>
    <p>Please close this window and try again.</p>
</body>
</html>"#,
        message
    )
}

// ============================================================================
// DriveAuthAdapter
// ============================================================================

/// High-level authentication adapter that orchestrates the full OAuth2 PKCE flow.
///
/// Combines [`PkceFlow`], [`LocalCallbackServer`], and browser launching to
/// provide a complete interactive authentication experience:
///
/// 1. Generates the PKCE authorization URL
/// 2. Opens the user's browser to the Google consent page
/// 3. Starts a local callback server to receive the redirect
/// 4. Exchanges the authorization code for a credential
pub struct DriveAuthAdapter {
    config: OAuthConfig,
}

impl DriveAuthAdapter {
    /// Creates a new DriveAuthAdapter with the given configuration
    pub fn new(config: OAuthConfig) -> Self {
        Self { config }
    }

    /// Creates a new DriveAuthAdapter with just a client ID
    pub fn with_client_id(client_id: impl Into<String>) -> Self {
        Self {
            config: OAuthConfig::new(client_id),
        }
    }

    /// Performs the full interactive OAuth2 PKCE login flow
    ///
    /// # Returns
    /// A credential on successful authentication; consent denial surfaces
    /// as [`AuthError::ConsentDenied`] inside the error chain
    pub async fn login(&self) -> Result<Credential> {
        info!("Starting OAuth2 PKCE login flow");

        let flow = PkceFlow::new(&self.config)?;

        // Step 1: Generate authorization URL with PKCE
        let (auth_url, _csrf_token, pkce_verifier) = flow.generate_auth_url();

        // Step 2: Open the browser
        info!("Opening browser for authentication");
        webbrowser::open(&auth_url).context("Failed to open browser for authentication")?;

        // Step 3: Start local callback server and wait for redirect
        let callback = LocalCallbackServer::start().await?;

        // Step 4: Exchange authorization code for a credential
        let credential = flow.exchange_code(callback.code, pkce_verifier).await?;

        info!("OAuth2 PKCE login completed successfully");
        Ok(credential)
    }

    /// Refreshes an expired access token
    pub async fn refresh(&self, refresh_token: &str) -> Result<Credential> {
        let flow = PkceFlow::new(&self.config)?;
        flow.refresh_token(refresh_token).await
    }

    /// Returns a reference to the current configuration
    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }
}
