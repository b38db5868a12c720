//! DiscardSessionHandler - Command handler for deleting a session.

use std::sync::Arc;
use tracing::debug;

use crate::domain::advisor::AdvisorError;
use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

/// Command to discard a session and its answers.
#[derive(Debug, Clone)]
pub struct DiscardSessionCommand {
    pub session_id: SessionId,
}

/// Handler for discarding sessions.
pub struct DiscardSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl DiscardSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: DiscardSessionCommand) -> Result<(), AdvisorError> {
        if !self.store.delete(&cmd.session_id).await? {
            return Err(AdvisorError::not_found(cmd.session_id));
        }
        debug!(session_id = %cmd.session_id, "Advisor session discarded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::advisor::AdvisorSession;

    #[tokio::test]
    async fn discards_existing_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let session = AdvisorSession::new(SessionId::new());
        store.insert(&session).await.unwrap();
        let handler = DiscardSessionHandler::new(store.clone());

        handler
            .handle(DiscardSessionCommand {
                session_id: *session.id(),
            })
            .await
            .unwrap();

        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn discarding_twice_is_not_found() {
        let store = Arc::new(InMemorySessionStore::new());
        let session = AdvisorSession::new(SessionId::new());
        store.insert(&session).await.unwrap();
        let handler = DiscardSessionHandler::new(store);
        let cmd = DiscardSessionCommand {
            session_id: *session.id(),
        };

        handler.handle(cmd.clone()).await.unwrap();
        let err = handler.handle(cmd).await.unwrap_err();

        assert_eq!(err, AdvisorError::NotFound(*session.id()));
    }
}
