//! Explicit work management for background operations
//!
//! Every user-triggered network operation runs as a tracked, cancellable
//! task rather than a fire-and-forget spawn. `spawn_cancellable` hands back
//! an [`OperationHandle`] the caller owns; `UploadGate` serializes uploads
//! so two concurrent uploads cannot race each other.

use std::fmt::{self, Display, Formatter};
use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::domain::errors::DomainError;

// ============================================================================
// OperationId
// ============================================================================

/// Identifier for a spawned operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperationId(Uuid);

impl OperationId {
    /// Create a new random OperationId
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OperationId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for OperationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// OperationHandle
// ============================================================================

/// How a tracked operation ended
#[derive(Debug, PartialEq, Eq)]
pub enum OperationOutcome<T> {
    /// The operation ran to completion with this value
    Completed(T),
    /// The operation was cancelled before completing
    Cancelled,
}

/// Handle to a spawned, cancellable operation
///
/// Dropping the handle does NOT cancel the operation; cancellation is an
/// explicit decision via [`OperationHandle::cancel`].
pub struct OperationHandle<T> {
    id: OperationId,
    token: CancellationToken,
    join: JoinHandle<Option<T>>,
}

impl<T> OperationHandle<T> {
    /// Returns this operation's identifier
    pub fn id(&self) -> OperationId {
        self.id
    }

    /// Requests cancellation of the operation
    ///
    /// The operation resolves to [`OperationOutcome::Cancelled`] at its next
    /// await point.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns a token that cancels this operation when triggered
    ///
    /// Useful for wiring cancellation to an external signal (e.g. Ctrl-C)
    /// while the handle itself is being joined.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Returns true once the underlying task has finished
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Waits for the operation to finish
    ///
    /// # Errors
    /// Returns an error if the underlying task panicked
    pub async fn join(self) -> anyhow::Result<OperationOutcome<T>> {
        let result = self.join.await.context("Operation task failed")?;
        Ok(match result {
            Some(value) => OperationOutcome::Completed(value),
            None => OperationOutcome::Cancelled,
        })
    }
}

impl<T> fmt::Debug for OperationHandle<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationHandle")
            .field("id", &self.id)
            .field("finished", &self.join.is_finished())
            .finish()
    }
}

/// Spawns a background operation with an attached cancellation token
///
/// The closure receives a child token so the operation body can observe
/// cancellation at its own await points; the select around the body also
/// resolves the task as soon as cancellation is requested.
pub fn spawn_cancellable<T, F, Fut>(make: F) -> OperationHandle<T>
where
    T: Send + 'static,
    F: FnOnce(CancellationToken) -> Fut,
    Fut: Future<Output = T> + Send + 'static,
{
    let token = CancellationToken::new();
    let child = token.child_token();
    let body = make(child.clone());

    let join = tokio::spawn(async move {
        tokio::select! {
            () = child.cancelled() => None,
            value = body => Some(value),
        }
    });

    OperationHandle {
        id: OperationId::new(),
        token,
        join,
    }
}

// ============================================================================
// UploadGate
// ============================================================================

/// Permit proving the holder owns the single upload slot
///
/// Released when dropped.
#[derive(Debug)]
pub struct UploadPermit {
    _permit: OwnedSemaphorePermit,
}

/// Serializes uploads: only one may be in flight at a time
///
/// A second upload attempted while one holds the permit fails fast with
/// `DomainError::UploadInProgress` instead of running concurrently.
#[derive(Debug, Clone)]
pub struct UploadGate {
    permits: Arc<Semaphore>,
}

impl UploadGate {
    /// Creates a gate with a single upload slot
    #[must_use]
    pub fn new() -> Self {
        Self {
            permits: Arc::new(Semaphore::new(1)),
        }
    }

    /// Tries to claim the upload slot without waiting
    ///
    /// # Errors
    /// Returns `DomainError::UploadInProgress` if the slot is taken
    pub fn try_begin(&self) -> Result<UploadPermit, DomainError> {
        Arc::clone(&self.permits)
            .try_acquire_owned()
            .map(|permit| UploadPermit { _permit: permit })
            .map_err(|_| DomainError::UploadInProgress)
    }
}

impl Default for UploadGate {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
