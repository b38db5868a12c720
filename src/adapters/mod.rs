//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Completion clients (OpenAI, mock)
//! - `storage` - Session stores (in-memory)
//! - `http` - REST API (axum)

pub mod ai;
pub mod http;
pub mod storage;

pub use ai::{MockCompletionClient, OpenAIClient, OpenAIConfig};
pub use storage::InMemorySessionStore;
