//! Completion Client Port - Interface to the text-generation backend.
//!
//! One call per request: no retries, no streaming. Every transport, auth or
//! backend error is reported as [`CompletionResult::Failure`] with a short
//! reason, so callers never have to handle a provider-specific error type.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct EchoClient;
//!
//! #[async_trait]
//! impl CompletionClient for EchoClient {
//!     async fn complete(&self, request: CompletionRequest) -> CompletionResult {
//!         CompletionResult::success(request.user_prompt)
//!     }
//!
//!     fn client_info(&self) -> ClientInfo {
//!         ClientInfo::new("echo")
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::advisor::Prompt;

pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_MAX_TOKENS: u32 = 600;
pub const DEFAULT_TEMPERATURE: f32 = 0.5;
pub const DEFAULT_SAMPLE_COUNT: u32 = 1;

/// Port for one-shot completions.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends the request and waits for the first choice.
    async fn complete(&self, request: CompletionRequest) -> CompletionResult;

    /// Describes the backend, for logs.
    fn client_info(&self) -> ClientInfo;
}

/// Request for a single completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system_instruction: String,
    pub user_prompt: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Number of choices to generate.
    pub sample_count: u32,
}

impl CompletionRequest {
    /// Creates a request with the default sampling parameters.
    pub fn new(system_instruction: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            user_prompt: user_prompt.into(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            sample_count: DEFAULT_SAMPLE_COUNT,
        }
    }

    /// Creates a request for a synthesized prompt, using its branch's
    /// system instruction.
    pub fn for_prompt(prompt: &Prompt) -> Self {
        Self::new(prompt.system_instruction(), prompt.as_str())
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Outcome of a completion call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CompletionResult {
    Success { text: String },
    Failure { reason: String },
}

impl CompletionResult {
    pub fn success(text: impl Into<String>) -> Self {
        CompletionResult::Success { text: text.into() }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        CompletionResult::Failure {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CompletionResult::Success { .. })
    }
}

/// Errors a client adapter can hit before it turns them into a
/// [`CompletionResult::Failure`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompletionError {
    #[error("missing credential")]
    MissingCredential,

    #[error("timeout")]
    Timeout,

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("rate limited")]
    RateLimited,

    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("unexpected status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },
}

impl CompletionError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        CompletionError::Unavailable(message.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        CompletionError::Network(message.into())
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        CompletionError::InvalidResponse(message.into())
    }
}

impl From<CompletionError> for CompletionResult {
    fn from(err: CompletionError) -> Self {
        CompletionResult::failure(err.to_string())
    }
}

/// Backend description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    /// Backend name (e.g., "openai", "mock").
    pub name: String,
    /// Base URL requests go to, when there is one.
    pub endpoint: Option<String>,
}

impl ClientInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }
}
