//! Session Store Port - Persistence for advisor sessions.
//!
//! Updates are optimistic: the caller passes the version it loaded, and the
//! store refuses the write if someone else saved in between.

use async_trait::async_trait;

use crate::domain::advisor::AdvisorSession;
use crate::domain::foundation::SessionId;

/// Errors that can occur during session storage operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("Session already exists: {0}")]
    AlreadyExists(SessionId),

    #[error("Version conflict: expected {expected}, found {actual}")]
    VersionConflict { expected: u64, actual: u64 },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Port for storing advisor sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Stores a new session.
    ///
    /// # Errors
    /// Returns `StoreError::AlreadyExists` if the id is taken
    async fn insert(&self, session: &AdvisorSession) -> Result<(), StoreError>;

    /// Loads a session, `None` if it does not exist.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<AdvisorSession>, StoreError>;

    /// Replaces a stored session.
    ///
    /// # Arguments
    /// * `session` - The modified session
    /// * `expected_version` - Version the caller loaded before modifying it
    ///
    /// # Errors
    /// Returns `StoreError::VersionConflict` if the stored version differs
    async fn update(&self, session: &AdvisorSession, expected_version: u64)
        -> Result<(), StoreError>;

    /// Clears a session's in-flight dispatch flag regardless of its version.
    /// Returns whether the flag was set; a missing session yields `false`.
    async fn clear_dispatch_in_flight(&self, id: &SessionId) -> Result<bool, StoreError>;

    /// Removes a session. Returns whether it existed.
    async fn delete(&self, id: &SessionId) -> Result<bool, StoreError>;
}
