//! Local source port (driven/secondary port)
//!
//! Interface for reading the local file a user picked for upload. Kept
//! separate from the remote gateway so the permission probe can run - and
//! fail - before any bytes are read or any network call is made.

use std::path::Path;

// ============================================================================
// SourceState
// ============================================================================

/// Snapshot of a local source's state at probe time
#[derive(Debug, Clone)]
pub struct SourceState {
    /// Whether the path exists
    pub exists: bool,
    /// Whether this is a regular file (false for directories and other types)
    pub is_file: bool,
    /// Whether the current process may read the file
    pub readable: bool,
    /// Size in bytes (0 when unknown or non-existent)
    pub size: u64,
}

impl SourceState {
    /// Returns a state representing a non-existent path
    pub fn not_found() -> Self {
        Self {
            exists: false,
            is_file: false,
            readable: false,
            size: 0,
        }
    }

    /// Returns true if the source is a regular file we are allowed to read
    pub fn is_readable_file(&self) -> bool {
        self.exists && self.is_file && self.readable
    }
}

// ============================================================================
// ILocalSource trait
// ============================================================================

/// Port trait for local file access
#[async_trait::async_trait]
pub trait ILocalSource: Send + Sync {
    /// Probes a path without reading its content
    ///
    /// Returns `SourceState::not_found()` for missing paths rather than an
    /// error; errors are reserved for probe failures themselves.
    async fn probe(&self, path: &Path) -> anyhow::Result<SourceState>;

    /// Reads the entire contents of the file
    ///
    /// # Errors
    /// Returns an error if the file doesn't exist or cannot be read
    async fn read(&self, path: &Path) -> anyhow::Result<Vec<u8>>;
}
