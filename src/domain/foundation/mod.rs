//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps and error types that the advisor
//! domain builds on.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{ErrorCode, ValidationError};
pub use ids::SessionId;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
