//! StartSessionHandler - Command handler for opening a new advisor session.

use std::sync::Arc;
use tracing::debug;

use crate::domain::advisor::{AdvisorError, AdvisorSession};
use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

/// Handler for starting sessions.
pub struct StartSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl StartSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self) -> Result<AdvisorSession, AdvisorError> {
        let session = AdvisorSession::new(SessionId::new());
        self.store.insert(&session).await?;
        debug!(session_id = %session.id(), "Advisor session started");
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::advisor::Stage;
    use crate::ports::StoreError;
    use async_trait::async_trait;

    struct UnavailableStore;

    #[async_trait]
    impl SessionStore for UnavailableStore {
        async fn insert(&self, _session: &AdvisorSession) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("simulated outage".into()))
        }

        async fn find_by_id(&self, _id: &SessionId) -> Result<Option<AdvisorSession>, StoreError> {
            Ok(None)
        }

        async fn update(&self, _session: &AdvisorSession, _v: u64) -> Result<(), StoreError> {
            Ok(())
        }

        async fn clear_dispatch_in_flight(&self, _id: &SessionId) -> Result<bool, StoreError> {
            Ok(false)
        }

        async fn delete(&self, _id: &SessionId) -> Result<bool, StoreError> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn starts_session_at_goal_stage_and_stores_it() {
        let store = Arc::new(crate::adapters::storage::InMemorySessionStore::new());
        let handler = StartSessionHandler::new(store.clone());

        let session = handler.handle().await.unwrap();

        assert_eq!(session.stage(), Stage::AwaitGoal);
        assert!(store.find_by_id(session.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn store_failure_is_reported() {
        let handler = StartSessionHandler::new(Arc::new(UnavailableStore));

        let err = handler.handle().await.unwrap_err();

        assert!(matches!(err, AdvisorError::Store(_)));
    }
}
