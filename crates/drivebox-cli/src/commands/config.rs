//! Config command - View and validate drivebox configuration
//!
//! Provides the `drivebox config` CLI command which:
//! 1. Shows the current configuration (YAML or JSON)
//! 2. Prints the configuration file path
//! 3. Validates the configuration file and reports errors

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use drivebox_core::config::Config;
use tracing::info;

use crate::output::{get_formatter, OutputFormat};

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Validate the configuration file
    Validate,
}

impl ConfigCommand {
    /// Execute the config command
    pub async fn execute(&self, format: OutputFormat, config_path: &Path) -> Result<()> {
        match self {
            ConfigCommand::Show => self.execute_show(format, config_path).await,
            ConfigCommand::Path => self.execute_path(format, config_path).await,
            ConfigCommand::Validate => self.execute_validate(format, config_path).await,
        }
    }

    /// Show current configuration
    async fn execute_show(&self, format: OutputFormat, config_path: &Path) -> Result<()> {
        let fmt = get_formatter(format.is_json());
        let config = Config::load_or_default(config_path);

        info!(config_path = %config_path.display(), "Showing configuration");

        if format.is_json() {
            let json = serde_json::to_value(&config)
                .context("Failed to serialize configuration to JSON")?;
            fmt.print_json(&json);
        } else {
            fmt.success(&format!("Configuration ({})", config_path.display()));

            let yaml = serde_yaml::to_string(&config)
                .context("Failed to serialize configuration to YAML")?;
            for line in yaml.lines() {
                fmt.info(line);
            }
        }

        Ok(())
    }

    /// Print the configuration file path
    async fn execute_path(&self, format: OutputFormat, config_path: &Path) -> Result<()> {
        let fmt = get_formatter(format.is_json());

        if format.is_json() {
            fmt.print_json(&serde_json::json!({
                "path": config_path.display().to_string(),
                "exists": config_path.exists(),
            }));
        } else {
            println!("{}", config_path.display());
        }

        Ok(())
    }

    /// Validate the configuration file
    async fn execute_validate(&self, format: OutputFormat, config_path: &Path) -> Result<()> {
        let fmt = get_formatter(format.is_json());
        let config = Config::load_or_default(config_path);

        let errors = config.validate();

        if format.is_json() {
            fmt.print_json(&serde_json::json!({
                "valid": errors.is_empty(),
                "errors": errors
                    .iter()
                    .map(|e| serde_json::json!({"field": e.field, "message": e.message}))
                    .collect::<Vec<_>>(),
            }));
        } else if errors.is_empty() {
            fmt.success("Configuration is valid");
        } else {
            for error in &errors {
                fmt.error(&error.to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            anyhow::bail!("{} configuration error(s) found", errors.len())
        }
    }
}
