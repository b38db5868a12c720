//! In-Memory Session Store Adapter
//!
//! Keeps advisor sessions in a map behind an async lock. A session that has
//! not been written for longer than the idle TTL is treated as gone and is
//! dropped by the next sweep.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use crate::domain::advisor::AdvisorSession;
use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, StoreError};

/// Idle lifetime used by [`InMemorySessionStore::new`].
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone)]
struct Entry {
    session: AdvisorSession,
    written_at: Instant,
}

impl Entry {
    fn new(session: AdvisorSession) -> Self {
        Self {
            session,
            written_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.duration_since(self.written_at) > ttl
    }
}

/// In-memory storage for advisor sessions
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Entry>>>,
    ttl: Duration,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose sessions expire after `ttl` without a write.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Number of entries held, expired ones included until the next sweep.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops every expired session. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| !entry.is_expired(self.ttl, now));
        before - sessions.len()
    }

    /// Runs [`purge_expired`](Self::purge_expired) every `period` until the
    /// runtime shuts down.
    pub fn spawn_sweeper(&self, period: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let removed = store.purge_expired().await;
                if removed > 0 {
                    debug!(removed, "Evicted idle advisor sessions");
                }
            }
        })
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: &AdvisorSession) -> Result<(), StoreError> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let taken = sessions
            .get(session.id())
            .is_some_and(|entry| !entry.is_expired(self.ttl, now));
        if taken {
            return Err(StoreError::AlreadyExists(*session.id()));
        }
        sessions.insert(*session.id(), Entry::new(session.clone()));
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<AdvisorSession>, StoreError> {
        let now = Instant::now();
        Ok(self
            .sessions
            .read()
            .await
            .get(id)
            .filter(|entry| !entry.is_expired(self.ttl, now))
            .map(|entry| entry.session.clone()))
    }

    async fn update(
        &self,
        session: &AdvisorSession,
        expected_version: u64,
    ) -> Result<(), StoreError> {
        let now = Instant::now();
        // Check and write under one lock so concurrent updates serialize.
        let mut sessions = self.sessions.write().await;
        let stored = sessions
            .get_mut(session.id())
            .filter(|entry| !entry.is_expired(self.ttl, now))
            .ok_or(StoreError::NotFound(*session.id()))?;
        if stored.session.version() != expected_version {
            return Err(StoreError::VersionConflict {
                expected: expected_version,
                actual: stored.session.version(),
            });
        }
        *stored = Entry::new(session.clone());
        Ok(())
    }

    async fn clear_dispatch_in_flight(&self, id: &SessionId) -> Result<bool, StoreError> {
        let mut sessions = self.sessions.write().await;
        let Some(entry) = sessions.get_mut(id) else {
            return Ok(false);
        };
        Ok(entry.session.abandon_dispatch())
    }

    async fn delete(&self, id: &SessionId) -> Result<bool, StoreError> {
        Ok(self.sessions.write().await.remove(id).is_some())
    }
}
