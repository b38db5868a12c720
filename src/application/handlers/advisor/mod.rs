//! Advisor command and query handlers.

mod discard_session;
mod get_session;
mod request_assistance;
mod start_session;
mod submit_answer;

pub use discard_session::{DiscardSessionCommand, DiscardSessionHandler};
pub use get_session::{GetSessionHandler, GetSessionQuery};
pub use request_assistance::{
    AssistanceResult, DispatchSettings, RequestAssistanceCommand, RequestAssistanceHandler,
};
pub use start_session::StartSessionHandler;
pub use submit_answer::{SubmitAnswerCommand, SubmitAnswerHandler, SubmitAnswerResult};

use crate::domain::advisor::{AdvisorError, AdvisorSession};
use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

/// How often a write is retried after losing an optimistic version race.
const MAX_SAVE_ATTEMPTS: usize = 5;

async fn load_session(
    store: &dyn SessionStore,
    id: &SessionId,
) -> Result<AdvisorSession, AdvisorError> {
    store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AdvisorError::not_found(*id))
}
