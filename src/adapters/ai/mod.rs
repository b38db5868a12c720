//! AI adapters - CompletionClient implementations.
//!
//! - `OpenAIClient` - OpenAI-compatible chat completions API
//! - `MockCompletionClient` - Scripted outcomes for tests

mod mock_client;
mod openai_client;

pub use mock_client::MockCompletionClient;
pub use openai_client::{OpenAIClient, OpenAIConfig, DEFAULT_BASE_URL};
