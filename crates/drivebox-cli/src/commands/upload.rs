//! Upload command - send a local file to the remote backend
//!
//! The upload runs as a tracked background operation with an explicit
//! handle, so Ctrl-C cancels the in-flight request instead of killing the
//! process mid-call. Readability of the source is checked by the use case
//! before any bytes move.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use drivebox_core::config::Config;
use drivebox_core::usecases::UploadFileUseCase;
use drivebox_core::work::{spawn_cancellable, OperationOutcome};
use tracing::info;

use crate::output::{get_formatter, OutputFormat};
use crate::source::TokioLocalSource;

/// Arguments for the upload subcommand
#[derive(Debug, clap::Args)]
pub struct UploadCommand {
    /// Path of the local file to upload
    pub path: PathBuf,

    /// Remote display name (defaults to the local file name)
    #[arg(long)]
    pub name: Option<String>,

    /// MIME content type (defaults to upload.default_content_type)
    #[arg(long)]
    pub content_type: Option<String>,
}

impl UploadCommand {
    pub async fn execute(&self, format: OutputFormat, config: &Config) -> Result<()> {
        let fmt = get_formatter(format.is_json());

        // Step 1: Establish the session
        let ctx = super::establish_session(config).await?;

        // Step 2: Resolve display name and content type
        let display_name = match &self.name {
            Some(name) => name.clone(),
            None => self
                .path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.to_string())
                .context("Cannot derive a display name from the path; pass --name")?,
        };
        let content_type = self
            .content_type
            .clone()
            .unwrap_or_else(|| config.upload.default_content_type.clone());

        info!(path = %self.path.display(), name = %display_name, "Starting upload");

        // Step 3: Spawn the upload as a tracked, cancellable operation
        let usecase = Arc::new(UploadFileUseCase::new(
            Arc::clone(&ctx.gateway),
            Arc::new(TokioLocalSource),
        ));
        let session = ctx.session;
        let path = self.path.clone();
        let task_name = display_name.clone();

        let handle = spawn_cancellable(move |_token| async move {
            usecase
                .upload(&session, &path, &task_name, &content_type)
                .await
        });

        // Ctrl-C cancels the in-flight upload through the handle's token
        let canceller = handle.cancellation_token();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                canceller.cancel();
            }
        });

        // Step 4: Wait for the outcome
        match handle.join().await? {
            OperationOutcome::Completed(result) => {
                let result = result?;
                fmt.success(&format!("Uploaded '{}'", display_name));
                fmt.info(&format!("File ID: {}", result.assigned_id));
                if format.is_json() {
                    fmt.print_json(&serde_json::json!({
                        "id": result.assigned_id.as_str(),
                        "name": display_name,
                    }));
                }
                Ok(())
            }
            OperationOutcome::Cancelled => {
                fmt.warn("Upload cancelled");
                anyhow::bail!("upload cancelled before completion")
            }
        }
    }
}
