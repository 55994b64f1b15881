//! Local file source adapter
//!
//! Implements the core `ILocalSource` port with `tokio::fs`. The probe
//! opens the file to establish readability, so permission problems surface
//! before the workflow reads anything or touches the network.

use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use drivebox_core::ports::{ILocalSource, SourceState};
use tracing::debug;

/// `ILocalSource` backed by the local filesystem via tokio
pub struct TokioLocalSource;

#[async_trait::async_trait]
impl ILocalSource for TokioLocalSource {
    async fn probe(&self, path: &Path) -> Result<SourceState> {
        let metadata = match tokio::fs::metadata(path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(SourceState::not_found());
            }
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                // The path exists but we may not even stat it; report it as
                // an unreadable file so the workflow refuses it up front
                return Ok(SourceState {
                    exists: true,
                    is_file: true,
                    readable: false,
                    size: 0,
                });
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to probe {}", path.display()))
            }
        };

        let is_file = metadata.is_file();
        let readable = is_file && tokio::fs::File::open(path).await.is_ok();

        debug!(
            path = %path.display(),
            is_file,
            readable,
            size = metadata.len(),
            "Probed local source"
        );

        Ok(SourceState {
            exists: true,
            is_file,
            readable,
            size: metadata.len(),
        })
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))
    }
}
