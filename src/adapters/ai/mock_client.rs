//! Mock Completion Client for testing.
//!
//! Provides a configurable mock implementation of the CompletionClient port,
//! allowing tests to run without calling a real backend.
//!
//! # Example
//!
//! ```ignore
//! let client = MockCompletionClient::new()
//!     .with_response("Use a random forest.")
//!     .with_delay(Duration::from_millis(100));
//!
//! let result = client.complete(request).await;
//! assert_eq!(result, CompletionResult::success("Use a random forest."));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    ClientInfo, CompletionClient, CompletionError, CompletionRequest, CompletionResult,
};

const DEFAULT_RESPONSE: &str = "Mock recommendation";

/// Mock completion client.
///
/// Returns queued outcomes in order, then a default success.
#[derive(Debug, Clone, Default)]
pub struct MockCompletionClient {
    /// Pre-configured outcomes (consumed in order).
    responses: Arc<Mutex<VecDeque<CompletionResult>>>,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockCompletionClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        lock(&self.responses).push_back(CompletionResult::success(text));
        self
    }

    /// Adds a failure to the queue.
    pub fn with_error(self, error: CompletionError) -> Self {
        lock(&self.responses).push_back(error.into());
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this client.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        lock(&self.calls).clone()
    }

    fn next_response(&self) -> CompletionResult {
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| CompletionResult::success(DEFAULT_RESPONSE))
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> CompletionResult {
        lock(&self.calls).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        self.next_response()
    }

    fn client_info(&self) -> ClientInfo {
        ClientInfo::new("mock")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_queued_outcomes_in_order_then_default() {
        let client = MockCompletionClient::new()
            .with_response("first")
            .with_error(CompletionError::RateLimited);

        let request = CompletionRequest::new("system", "user");
        assert_eq!(
            client.complete(request.clone()).await,
            CompletionResult::success("first")
        );
        assert_eq!(
            client.complete(request.clone()).await,
            CompletionResult::failure("rate limited")
        );
        assert_eq!(
            client.complete(request).await,
            CompletionResult::success(DEFAULT_RESPONSE)
        );
    }

    #[tokio::test]
    async fn records_calls() {
        let client = MockCompletionClient::new();
        client
            .complete(CompletionRequest::new("system", "hello"))
            .await;

        assert_eq!(client.call_count(), 1);
        assert_eq!(client.get_calls()[0].user_prompt, "hello");
    }

    #[tokio::test(start_paused = true)]
    async fn delay_is_applied() {
        let client = MockCompletionClient::new().with_delay(Duration::from_secs(5));
        let started = tokio::time::Instant::now();
        client.complete(CompletionRequest::new("s", "u")).await;
        assert!(started.elapsed() >= Duration::from_secs(5));
    }
}
