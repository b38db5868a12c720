//! SubmitAnswerHandler - Command handler for answering the current question.
//!
//! Rejected answers are not errors: the transition carries a warning notice
//! and the stored session is left as it was.

use std::sync::Arc;
use tracing::debug;

use crate::domain::advisor::{AdvisorError, AdvisorSession, Answer, Transition};
use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, StoreError};

use super::{load_session, MAX_SAVE_ATTEMPTS};

/// Command to submit one answer.
#[derive(Debug, Clone)]
pub struct SubmitAnswerCommand {
    pub session_id: SessionId,
    pub answer: Answer,
}

/// Result of a submitted answer.
#[derive(Debug, Clone)]
pub struct SubmitAnswerResult {
    pub transition: Transition,
    pub session: AdvisorSession,
}

/// Handler for submitting answers.
pub struct SubmitAnswerHandler {
    store: Arc<dyn SessionStore>,
}

impl SubmitAnswerHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: SubmitAnswerCommand) -> Result<SubmitAnswerResult, AdvisorError> {
        for _ in 0..MAX_SAVE_ATTEMPTS {
            let mut session = load_session(self.store.as_ref(), &cmd.session_id).await?;
            let expected_version = session.version();
            let transition = session.submit(cmd.answer.clone());

            if !transition.accepted {
                debug!(
                    session_id = %cmd.session_id,
                    stage = %transition.stage,
                    "Answer rejected"
                );
                return Ok(SubmitAnswerResult { transition, session });
            }

            match self.store.update(&session, expected_version).await {
                Ok(()) => {
                    debug!(
                        session_id = %cmd.session_id,
                        from = %transition.from,
                        to = %transition.stage,
                        "Answer accepted"
                    );
                    return Ok(SubmitAnswerResult { transition, session });
                }
                // Replay the answer on the fresh state.
                Err(StoreError::VersionConflict { .. }) => continue,
                Err(err) => return Err(err.into()),
            }
        }
        Err(AdvisorError::VersionConflict)
    }
}
