//! Advisor error types.

use crate::domain::foundation::{ErrorCode, SessionId};
use crate::ports::StoreError;

use super::flow::Stage;
use super::session::DispatchError;

/// Errors returned by the advisor command handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvisorError {
    /// Session was not found.
    NotFound(SessionId),
    /// Assistance was requested before the answers were complete.
    NotReady(Stage),
    /// Another assistance request for the session is still running.
    DispatchInProgress,
    /// The session changed between load and save.
    VersionConflict,
    /// Answers are inconsistent with the stage.
    InvalidState(String),
    /// Session store failure.
    Store(String),
    /// Unexpected failure while serving the request.
    Internal(String),
}

impl AdvisorError {
    pub fn not_found(id: SessionId) -> Self {
        AdvisorError::NotFound(id)
    }

    pub fn store(message: impl Into<String>) -> Self {
        AdvisorError::Store(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AdvisorError::Internal(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AdvisorError::NotFound(_) => ErrorCode::SessionNotFound,
            AdvisorError::NotReady(_) | AdvisorError::InvalidState(_) => {
                ErrorCode::InvalidStateTransition
            }
            AdvisorError::DispatchInProgress => ErrorCode::DispatchInProgress,
            AdvisorError::VersionConflict => ErrorCode::ConcurrencyConflict,
            AdvisorError::Store(_) | AdvisorError::Internal(_) => ErrorCode::InternalError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AdvisorError::NotFound(id) => format!("Session not found: {}", id),
            AdvisorError::NotReady(stage) => {
                format!("Session is not ready for assistance (stage: {})", stage)
            }
            AdvisorError::DispatchInProgress => {
                "An assistance request is already in progress".to_string()
            }
            AdvisorError::VersionConflict => {
                "Session was modified concurrently, please retry".to_string()
            }
            AdvisorError::InvalidState(msg) => format!("Invalid state: {}", msg),
            AdvisorError::Store(msg) => format!("Storage error: {}", msg),
            AdvisorError::Internal(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for AdvisorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AdvisorError {}

impl From<DispatchError> for AdvisorError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::NotReady(stage) => AdvisorError::NotReady(stage),
            DispatchError::InProgress => AdvisorError::DispatchInProgress,
            DispatchError::Synthesis(e) => AdvisorError::InvalidState(e.to_string()),
        }
    }
}

impl From<StoreError> for AdvisorError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => AdvisorError::NotFound(id),
            StoreError::VersionConflict { .. } => AdvisorError::VersionConflict,
            other => AdvisorError::Store(other.to_string()),
        }
    }
}
