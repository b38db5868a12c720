//! GetSessionHandler - Query handler for retrieving a session.

use std::sync::Arc;

use crate::domain::advisor::{AdvisorError, AdvisorSession};
use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

use super::load_session;

/// Query to get a session by ID.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

/// Handler for retrieving sessions.
pub struct GetSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl GetSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<AdvisorSession, AdvisorError> {
        load_session(self.store.as_ref(), &query.session_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;

    #[tokio::test]
    async fn returns_stored_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let session = AdvisorSession::new(SessionId::new());
        store.insert(&session).await.unwrap();

        let handler = GetSessionHandler::new(store);
        let found = handler
            .handle(GetSessionQuery {
                session_id: *session.id(),
            })
            .await
            .unwrap();

        assert_eq!(found, session);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let handler = GetSessionHandler::new(Arc::new(InMemorySessionStore::new()));
        let id = SessionId::new();

        let err = handler.handle(GetSessionQuery { session_id: id }).await.unwrap_err();

        assert_eq!(err, AdvisorError::NotFound(id));
    }
}
