//! Configuration module for drivebox.
//!
//! Provides typed configuration structs that map to the YAML configuration
//! file, with loading, validation, defaults, and a builder pattern for
//! programmatic use.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::newtypes::PageSize;

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for drivebox.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub auth: AuthConfig,
    pub listing: ListingConfig,
    pub upload: UploadConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

/// Authentication / OAuth settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Google OAuth client ID. `None` until the user runs `drivebox auth login`.
    pub client_id: Option<String>,
}

/// Remote listing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Entries requested per page.
    pub page_size: u32,
    /// Follow `nextPageToken` until the listing is exhausted.
    pub follow_pagination: bool,
}

/// Upload settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Content type used when none is given on the command line.
    pub default_content_type: String,
}

/// HTTP transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            follow_pagination: true,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            default_content_type: "application/octet-stream".to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/drivebox/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("drivebox")
            .join("config.yaml")
    }

    /// The configured page size as a validated [`PageSize`].
    pub fn page_size(&self) -> Result<PageSize, crate::domain::DomainError> {
        PageSize::new(self.listing.page_size)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"listing.page_size"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- listing ---
        if self.listing.page_size == 0 || self.listing.page_size > PageSize::MAX {
            errors.push(ValidationError {
                field: "listing.page_size".into(),
                message: format!("must be in range 1..={}", PageSize::MAX),
            });
        }

        // --- upload ---
        if !self.upload.default_content_type.contains('/') {
            errors.push(ValidationError {
                field: "upload.default_content_type".into(),
                message: format!(
                    "not a MIME type: '{}'",
                    self.upload.default_content_type
                ),
            });
        }

        // --- http ---
        if self.http.timeout_secs == 0 {
            errors.push(ValidationError {
                field: "http.timeout_secs".into(),
                message: "must be greater than 0".into(),
            });
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`Config`] programmatically.
///
/// Starts from [`Config::default`] and allows selective overrides.
///
/// # Example
///
/// ```rust,no_run
/// use drivebox_core::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .listing_page_size(25)
///     .logging_level("debug")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder initialised with [`Config::default`] values.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    // --- auth ---

    pub fn auth_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.config.auth.client_id = Some(client_id.into());
        self
    }

    // --- listing ---

    pub fn listing_page_size(mut self, size: u32) -> Self {
        self.config.listing.page_size = size;
        self
    }

    pub fn listing_follow_pagination(mut self, follow: bool) -> Self {
        self.config.listing.follow_pagination = follow;
        self
    }

    // --- upload ---

    pub fn upload_default_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.config.upload.default_content_type = content_type.into();
        self
    }

    // --- http ---

    pub fn http_timeout_secs(mut self, seconds: u64) -> Self {
        self.config.http.timeout_secs = seconds;
        self
    }

    // --- logging ---

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    // --- build ---

    /// Consume the builder and return the finished [`Config`].
    pub fn build(self) -> Config {
        self.config
    }

    /// Build and validate in one step. Returns `Err` with the list of
    /// validation errors if the configuration is invalid.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let config = self.build();
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors)
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
