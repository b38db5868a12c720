//! RequestAssistanceHandler - Command handler for the "Get AI Assistance"
//! trigger.
//!
//! # Flow
//!
//! 1. Mark the session as dispatching (optimistic version check)
//! 2. Send the synthesized prompt to the completion client
//! 3. Record the outcome and clear the in-flight flag
//!
//! Steps 2 and 3 run on a spawned task, so the outcome is recorded even if
//! the caller stops waiting.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::domain::advisor::{AdvisorError, Prompt};
use crate::domain::foundation::SessionId;
use crate::ports::{
    CompletionClient, CompletionError, CompletionRequest, CompletionResult, SessionStore,
    StoreError, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};

use super::{load_session, MAX_SAVE_ATTEMPTS};

/// Sampling parameters and the overall time limit for one dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(60),
        }
    }
}

impl DispatchSettings {
    fn request_for(&self, prompt: &Prompt) -> CompletionRequest {
        CompletionRequest::for_prompt(prompt)
            .with_model(self.model.clone())
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature)
    }
}

/// Command to request assistance for a ready session.
#[derive(Debug, Clone)]
pub struct RequestAssistanceCommand {
    pub session_id: SessionId,
}

/// Prompt that was sent and what came back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistanceResult {
    pub session_id: SessionId,
    pub prompt: Prompt,
    pub result: CompletionResult,
}

/// Handler for assistance requests.
pub struct RequestAssistanceHandler {
    store: Arc<dyn SessionStore>,
    client: Arc<dyn CompletionClient>,
    settings: DispatchSettings,
}

impl RequestAssistanceHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        client: Arc<dyn CompletionClient>,
        settings: DispatchSettings,
    ) -> Self {
        Self {
            store,
            client,
            settings,
        }
    }

    /// Dispatches the session's prompt.
    ///
    /// Backend failures are not errors: they come back as
    /// `CompletionResult::Failure` and the session stays ready for a retry.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session does not exist
    /// - `NotReady` unless every question has been answered
    /// - `DispatchInProgress` if a dispatch for the session is still running
    pub async fn handle(
        &self,
        cmd: RequestAssistanceCommand,
    ) -> Result<AssistanceResult, AdvisorError> {
        let session_id = cmd.session_id;
        let prompt = self.begin(&session_id).await?;

        let task = tokio::spawn(dispatch_and_record(
            Arc::clone(&self.store),
            Arc::clone(&self.client),
            self.settings.clone(),
            session_id,
            prompt.clone(),
        ));
        let result = match task.await {
            Ok(result) => result?,
            Err(join_error) => {
                release_dispatch(self.store.as_ref(), &session_id).await;
                return Err(AdvisorError::internal(format!(
                    "dispatch task failed: {}",
                    join_error
                )));
            }
        };

        Ok(AssistanceResult {
            session_id,
            prompt,
            result,
        })
    }

    async fn begin(&self, session_id: &SessionId) -> Result<Prompt, AdvisorError> {
        for _ in 0..MAX_SAVE_ATTEMPTS {
            let mut session = load_session(self.store.as_ref(), session_id).await?;
            let expected_version = session.version();
            let prompt = session.begin_dispatch()?;

            match self.store.update(&session, expected_version).await {
                Ok(()) => return Ok(prompt),
                // Reload: a concurrent trigger now shows up as in flight.
                Err(StoreError::VersionConflict { .. }) => continue,
                Err(err) => return Err(err.into()),
            }
        }
        Err(AdvisorError::VersionConflict)
    }
}

async fn dispatch_and_record(
    store: Arc<dyn SessionStore>,
    client: Arc<dyn CompletionClient>,
    settings: DispatchSettings,
    session_id: SessionId,
    prompt: Prompt,
) -> Result<CompletionResult, AdvisorError> {
    let client_info = client.client_info();
    info!(
        session_id = %session_id,
        branch = ?prompt.branch(),
        client = %client_info.name,
        endpoint = client_info.endpoint.as_deref().unwrap_or("-"),
        model = %settings.model,
        "Dispatching completion request"
    );
    debug!(session_id = %session_id, prompt = %prompt, "Synthesized prompt");

    let request = settings.request_for(&prompt);
    let result = match tokio::time::timeout(settings.timeout, client.complete(request)).await {
        Ok(result) => result,
        Err(_) => CompletionError::Timeout.into(),
    };

    match &result {
        CompletionResult::Success { text } => {
            info!(session_id = %session_id, chars = text.len(), "Completion succeeded");
        }
        CompletionResult::Failure { reason } => {
            warn!(session_id = %session_id, reason = %reason, "Completion failed");
        }
    }

    if let Err(err) = record_outcome(store.as_ref(), &session_id, prompt, result.clone()).await {
        release_dispatch(store.as_ref(), &session_id).await;
        return Err(err);
    }
    Ok(result)
}

/// Clears the in-flight flag of a dispatch whose outcome was not recorded,
/// so the session accepts the next request.
async fn release_dispatch(store: &dyn SessionStore, session_id: &SessionId) {
    match store.clear_dispatch_in_flight(session_id).await {
        Ok(true) => warn!(session_id = %session_id, "Released dispatch without recording its outcome"),
        Ok(false) => {}
        Err(err) => error!(
            session_id = %session_id,
            error = %err,
            "Could not release in-flight dispatch"
        ),
    }
}

async fn record_outcome(
    store: &dyn SessionStore,
    session_id: &SessionId,
    prompt: Prompt,
    result: CompletionResult,
) -> Result<(), AdvisorError> {
    for _ in 0..MAX_SAVE_ATTEMPTS {
        let Some(mut session) = store.find_by_id(session_id).await? else {
            debug!(session_id = %session_id, "Session discarded during dispatch");
            return Ok(());
        };
        let expected_version = session.version();
        session.finish_dispatch(prompt.clone(), result.clone());

        match store.update(&session, expected_version).await {
            Ok(()) => return Ok(()),
            // Answers were edited meanwhile; record on top of them.
            Err(StoreError::VersionConflict { .. }) => continue,
            Err(StoreError::NotFound(_)) => return Ok(()),
            Err(err) => return Err(err.into()),
        }
    }
    error!(session_id = %session_id, "Could not record completion outcome");
    Err(AdvisorError::VersionConflict)
}
