//! Port definitions (trait interfaces for adapters)
//!
//! Ports define the boundaries between the domain core and the outside
//! world. Adapter crates implement these traits; use cases depend only on
//! the traits.

pub mod local_source;
pub mod remote_files;

// Re-export commonly used types
pub use local_source::{ILocalSource, SourceState};
pub use remote_files::IRemoteFileGateway;
