//! OpenAI Client - CompletionClient over the chat completions API.
//!
//! Works against any OpenAI-compatible endpoint. A single request is sent
//! per call, and the first choice's content is returned trimmed.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(Some(api_key))
//!     .with_base_url("https://api.openai.com/v1")
//!     .with_timeout(Duration::from_secs(60));
//!
//! let client = OpenAIClient::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{
    ClientInfo, CompletionClient, CompletionError, CompletionRequest, CompletionResult,
};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Configuration for the OpenAI client.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key. Without one every call fails with "missing credential".
    api_key: Option<Secret<String>>,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl OpenAIConfig {
    pub fn new(api_key: Option<Secret<String>>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key, if a non-blank one is configured.
    fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|key| key.expose_secret().as_str())
            .filter(|key| !key.trim().is_empty())
    }
}

/// OpenAI API client implementation.
pub struct OpenAIClient {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIClient {
    /// Creates a client with the given configuration.
    ///
    /// # Errors
    ///
    /// Fails if the underlying HTTP client cannot be built.
    pub fn new(config: OpenAIConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn to_openai_request(request: &CompletionRequest) -> OpenAIRequest {
        OpenAIRequest {
            model: request.model.clone(),
            messages: vec![
                OpenAIMessage {
                    role: "system".to_string(),
                    content: request.system_instruction.clone(),
                },
                OpenAIMessage {
                    role: "user".to_string(),
                    content: request.user_prompt.clone(),
                },
            ],
            max_tokens: request.max_tokens,
            n: request.sample_count,
            temperature: request.temperature,
        }
    }

    async fn send_request(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<Response, CompletionError> {
        self.client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(&Self::to_openai_request(request))
            .send()
            .await
            .map_err(map_transport_error)
    }

    /// Maps a non-success status to an error.
    async fn handle_response_status(response: Response) -> Result<Response, CompletionError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        let detail = error_message(&error_body).unwrap_or(error_body);

        match status.as_u16() {
            401 | 403 => Err(CompletionError::AuthenticationFailed),
            429 => Err(CompletionError::RateLimited),
            500..=599 => Err(CompletionError::unavailable(format!("{}: {}", status, detail))),
            code => Err(CompletionError::UnexpectedStatus {
                status: code,
                message: detail,
            }),
        }
    }

    async fn parse_response(response: Response) -> Result<String, CompletionError> {
        let response = Self::handle_response_status(response).await?;

        let openai_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::invalid_response(e.to_string()))?;

        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CompletionError::invalid_response("no choices in response"))?;

        choice
            .message
            .content
            .map(|content| content.trim().to_string())
            .ok_or_else(|| CompletionError::invalid_response("empty content"))
    }

    async fn try_complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let api_key = self.config.api_key().ok_or(CompletionError::MissingCredential)?;
        let response = self.send_request(api_key, request).await?;
        Self::parse_response(response).await
    }
}

fn map_transport_error(e: reqwest::Error) -> CompletionError {
    if e.is_timeout() {
        CompletionError::Timeout
    } else if e.is_connect() {
        CompletionError::network(format!("connection failed: {}", e))
    } else if e.is_decode() {
        CompletionError::invalid_response(e.to_string())
    } else {
        CompletionError::network(e.to_string())
    }
}

/// Pulls `error.message` out of an OpenAI error body.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<OpenAIErrorBody>(body)
        .ok()
        .map(|parsed| parsed.error.message)
}

#[async_trait]
impl CompletionClient for OpenAIClient {
    async fn complete(&self, request: CompletionRequest) -> CompletionResult {
        match self.try_complete(&request).await {
            Ok(text) => CompletionResult::success(text),
            Err(err) => err.into(),
        }
    }

    fn client_info(&self) -> ClientInfo {
        ClientInfo::new("openai").with_endpoint(self.config.base_url.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// OpenAI API Types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    max_tokens: u32,
    n: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIReply,
}

/// Assistant message; `content` is null on refusals and tool calls.
#[derive(Debug, Deserialize)]
struct OpenAIReply {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorBody {
    error: OpenAIErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorDetail {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::advisor::ANALYTIC_SYSTEM_INSTRUCTION;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, api_key: Option<&str>) -> OpenAIClient {
        let config = OpenAIConfig::new(api_key.map(|k| Secret::new(k.to_string())))
            .with_base_url(server.uri())
            .with_timeout(Duration::from_secs(5));
        OpenAIClient::new(config).unwrap()
    }

    fn request() -> CompletionRequest {
        CompletionRequest::new(ANALYTIC_SYSTEM_INSTRUCTION, "I am working on a project")
    }

    fn choice_body(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "model": "gpt-4",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        })
    }

    #[tokio::test]
    async fn sends_chat_request_and_returns_first_choice_trimmed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4",
                "max_tokens": 600,
                "n": 1,
                "temperature": 0.5,
                "messages": [
                    {"role": "system", "content": ANALYTIC_SYSTEM_INSTRUCTION},
                    {"role": "user", "content": "I am working on a project"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(choice_body(
                "\n  Try gradient boosted trees.  \n",
            )))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server, Some("sk-test")).complete(request()).await;

        assert_eq!(result, CompletionResult::success("Try gradient boosted trees."));
    }

    #[tokio::test]
    async fn missing_credential_fails_without_network_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(choice_body("unused")))
            .expect(0)
            .mount(&server)
            .await;

        let result = client_for(&server, None).complete(request()).await;
        assert_eq!(result, CompletionResult::failure("missing credential"));

        let result = client_for(&server, Some("   ")).complete(request()).await;
        assert_eq!(result, CompletionResult::failure("missing credential"));
    }

    #[tokio::test]
    async fn unauthorized_maps_to_authentication_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
            })))
            .mount(&server)
            .await;

        let result = client_for(&server, Some("sk-bad")).complete(request()).await;
        assert_eq!(result, CompletionResult::failure("authentication failed"));
    }

    #[tokio::test]
    async fn too_many_requests_maps_to_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let result = client_for(&server, Some("sk-test")).complete(request()).await;
        assert_eq!(result, CompletionResult::failure("rate limited"));
    }

    #[tokio::test]
    async fn server_error_maps_to_unavailable_with_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({
                "error": {"message": "The engine is currently overloaded"}
            })))
            .mount(&server)
            .await;

        let result = client_for(&server, Some("sk-test")).complete(request()).await;
        let CompletionResult::Failure { reason } = result else {
            panic!("expected failure, got {:?}", result);
        };
        assert!(reason.starts_with("provider unavailable: 503"));
        assert!(reason.contains("The engine is currently overloaded"));
    }

    #[tokio::test]
    async fn other_status_maps_to_unexpected_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
            .mount(&server)
            .await;

        let result = client_for(&server, Some("sk-test")).complete(request()).await;
        assert_eq!(
            result,
            CompletionResult::failure("unexpected status 400: bad request")
        );
    }

    #[tokio::test]
    async fn empty_choices_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let result = client_for(&server, Some("sk-test")).complete(request()).await;
        assert_eq!(
            result,
            CompletionResult::failure("invalid response: no choices in response")
        );
    }

    #[tokio::test]
    async fn undecodable_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = client_for(&server, Some("sk-test")).complete(request()).await;
        assert!(matches!(
            result,
            CompletionResult::Failure { reason } if reason.starts_with("invalid response: ")
        ));
    }

    #[tokio::test]
    async fn null_content_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": null, "refusal": "I can't help"},
                    "finish_reason": "stop"
                }]
            })))
            .mount(&server)
            .await;

        let result = client_for(&server, Some("sk-test")).complete(request()).await;
        assert_eq!(result, CompletionResult::failure("invalid response: empty content"));
    }

    #[tokio::test]
    async fn slow_backend_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(choice_body("late"))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let config = OpenAIConfig::new(Some(Secret::new("sk-test".to_string())))
            .with_base_url(server.uri())
            .with_timeout(Duration::from_millis(50));
        let client = OpenAIClient::new(config).unwrap();

        let result = client.complete(request()).await;
        assert_eq!(result, CompletionResult::failure("timeout"));
    }

    #[test]
    fn completions_url_tolerates_trailing_slash() {
        let config = OpenAIConfig::new(None).with_base_url("http://localhost:9000/v1/");
        let client = OpenAIClient::new(config).unwrap();
        assert_eq!(
            client.completions_url(),
            "http://localhost:9000/v1/chat/completions"
        );
    }

    #[test]
    fn config_debug_does_not_leak_key() {
        let config = OpenAIConfig::new(Some(Secret::new("sk-very-secret".to_string())));
        assert!(!format!("{:?}", config).contains("sk-very-secret"));
    }
}
