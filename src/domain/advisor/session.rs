//! Advisor session aggregate.
//!
//! Owns the current stage, the collected answers and the record of the last
//! completion. All stage changes go through [`flow::advance`](super::flow::advance).
//!
//! # Invariants
//!
//! - At most one dispatch is in flight at a time
//! - `version` increases on every accepted change
//! - A rejected answer changes nothing, not even `updated_at`

use serde::Serialize;
use thiserror::Error;

use crate::domain::foundation::{SessionId, Timestamp};
use crate::ports::CompletionResult;

use super::answers::AnswerSet;
use super::flow::{advance, Answer, Stage, Transition};
use super::prompt::{synthesize, Prompt, SynthesisError};

/// The last completed dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchRecord {
    pub prompt: Prompt,
    pub result: CompletionResult,
    pub finished_at: Timestamp,
}

/// Reasons a dispatch cannot start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("session is not ready for assistance (stage: {0})")]
    NotReady(Stage),

    #[error("an assistance request is already in progress")]
    InProgress,

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisorSession {
    id: SessionId,
    stage: Stage,
    answers: AnswerSet,
    dispatch_in_flight: bool,
    dispatch_count: u32,
    last_dispatch: Option<DispatchRecord>,
    version: u64,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl AdvisorSession {
    /// Starts a new session waiting for the user's goal.
    pub fn new(id: SessionId) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            stage: Stage::AwaitGoal,
            answers: AnswerSet::new(),
            dispatch_in_flight: false,
            dispatch_count: 0,
            last_dispatch: None,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn is_dispatch_in_flight(&self) -> bool {
        self.dispatch_in_flight
    }

    /// Number of completed dispatches.
    pub fn dispatch_count(&self) -> u32 {
        self.dispatch_count
    }

    pub fn last_dispatch(&self) -> Option<&DispatchRecord> {
        self.last_dispatch.as_ref()
    }

    /// Optimistic concurrency version.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────────

    /// Submits one answer. Answers may still be edited while a dispatch is
    /// in flight; the running request keeps the prompt it started with.
    pub fn submit(&mut self, answer: Answer) -> Transition {
        let transition = advance(self.stage, &mut self.answers, answer);
        if transition.accepted {
            self.stage = transition.stage;
            self.touch();
        }
        transition
    }

    /// Synthesizes the prompt and marks a dispatch as in flight.
    ///
    /// # Errors
    ///
    /// - `InProgress` if another dispatch has not finished
    /// - `NotReady` unless the stage is `Ready`
    /// - `Synthesis` if the answers cannot produce a prompt
    pub fn begin_dispatch(&mut self) -> Result<Prompt, DispatchError> {
        if self.dispatch_in_flight {
            return Err(DispatchError::InProgress);
        }
        let goal = match self.answers.goal() {
            Some(goal) if self.stage.is_ready() => goal,
            _ => return Err(DispatchError::NotReady(self.stage)),
        };
        let prompt = synthesize(goal, &self.answers)?;
        self.dispatch_in_flight = true;
        self.touch();
        Ok(prompt)
    }

    /// Records the outcome of the in-flight dispatch and clears the flag.
    /// The stage is left as it is, so a failed dispatch can be retried.
    pub fn finish_dispatch(&mut self, prompt: Prompt, result: CompletionResult) {
        self.dispatch_in_flight = false;
        self.dispatch_count += 1;
        self.last_dispatch = Some(DispatchRecord {
            prompt,
            result,
            finished_at: Timestamp::now(),
        });
        self.touch();
    }

    /// Clears the in-flight flag without recording an outcome. Used when
    /// the outcome of a dispatch could not be saved. Returns whether a
    /// dispatch was in flight.
    pub fn abandon_dispatch(&mut self) -> bool {
        if !self.dispatch_in_flight {
            return false;
        }
        self.dispatch_in_flight = false;
        self.touch();
        true
    }

    fn touch(&mut self) {
        self.version += 1;
        self.updated_at = Timestamp::now();
    }
}
