//! Upload use case
//!
//! Single-shot upload of a local file. The local source is probed before
//! anything else happens: if the file is unreadable the use case fails with
//! `PermissionDenied` without reading a byte or touching the network. The
//! upload gate rejects a second upload while one is in flight.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::{
    domain::{DomainError, DriveSession, UploadRequest, UploadResult},
    ports::{ILocalSource, IRemoteFileGateway},
    work::UploadGate,
};

/// Use case for uploading a local file to the remote backend
pub struct UploadFileUseCase {
    gateway: Arc<dyn IRemoteFileGateway>,
    source: Arc<dyn ILocalSource>,
    gate: UploadGate,
}

impl UploadFileUseCase {
    /// Creates a new UploadFileUseCase with the required dependencies
    pub fn new(gateway: Arc<dyn IRemoteFileGateway>, source: Arc<dyn ILocalSource>) -> Self {
        Self {
            gateway,
            source,
            gate: UploadGate::new(),
        }
    }

    /// Creates a use case sharing an externally owned upload gate
    pub fn with_gate(
        gateway: Arc<dyn IRemoteFileGateway>,
        source: Arc<dyn ILocalSource>,
        gate: UploadGate,
    ) -> Self {
        Self {
            gateway,
            source,
            gate,
        }
    }

    /// Uploads the file at `path` under the given display name
    ///
    /// This method:
    /// 1. Claims the upload slot (fails fast if another upload is running)
    /// 2. Probes the local source; an unreadable source aborts here
    /// 3. Reads the file contents
    /// 4. Builds the validated upload request
    /// 5. Sends it through the gateway and returns the assigned id
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UploadInProgress` when the slot is taken,
    /// `DomainError::PermissionDenied` for an unreadable source, and
    /// gateway errors for network failures. On failure nothing has been
    /// uploaded and no partial state exists.
    pub async fn upload(
        &self,
        session: &DriveSession,
        path: &Path,
        display_name: &str,
        content_type: &str,
    ) -> Result<UploadResult> {
        // Step 1: Claim the single upload slot
        let _permit = self.gate.try_begin()?;

        // Step 2: Probe readability before reading or going to the network
        let state = self
            .source
            .probe(path)
            .await
            .context("Failed to probe local source")?;

        if !state.is_readable_file() {
            return Err(DomainError::PermissionDenied(path.display().to_string()).into());
        }

        debug!(path = %path.display(), size = state.size, "Local source readable");

        // Step 3: Read the content
        let content = self
            .source
            .read(path)
            .await
            .context("Failed to read local source")?;

        // Step 4: Build the request
        let request = UploadRequest::new(display_name, content_type, content)
            .context("Invalid upload request")?;

        // Step 5: Hand off to the gateway
        let result = self
            .gateway
            .upload_file(session.credential(), request)
            .await
            .context("Failed to upload file")?;

        info!(id = %result.assigned_id, name = display_name, "Upload complete");
        Ok(result)
    }
}
