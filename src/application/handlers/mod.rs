//! Command and query handlers.
//!
//! Each handler wraps one use case and depends only on port traits.

pub mod advisor;

pub use advisor::{
    AssistanceResult, DiscardSessionCommand, DiscardSessionHandler, DispatchSettings,
    GetSessionHandler, GetSessionQuery, RequestAssistanceCommand, RequestAssistanceHandler,
    StartSessionHandler, SubmitAnswerCommand, SubmitAnswerHandler, SubmitAnswerResult,
};
