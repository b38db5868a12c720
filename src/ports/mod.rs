//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CompletionClient` - One-shot text generation backend
//! - `SessionStore` - Advisor session persistence with optimistic versioning

mod completion_client;
mod session_store;

pub use completion_client::{
    ClientInfo, CompletionClient, CompletionError, CompletionRequest, CompletionResult,
    DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_SAMPLE_COUNT, DEFAULT_TEMPERATURE,
};
pub use session_store::{SessionStore, StoreError};
