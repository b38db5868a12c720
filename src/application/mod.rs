//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers change a session; query handlers only read it.

pub mod handlers;

pub use handlers::{
    AssistanceResult, DiscardSessionCommand, DiscardSessionHandler, DispatchSettings,
    GetSessionHandler, GetSessionQuery, RequestAssistanceCommand, RequestAssistanceHandler,
    StartSessionHandler, SubmitAnswerCommand, SubmitAnswerHandler, SubmitAnswerResult,
};
