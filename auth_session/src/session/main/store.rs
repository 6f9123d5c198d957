use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration as StdDuration;
use tokio::sync::RwLock;

use crate::session::config::{SESSION_CLEANUP_BATCH_SIZE, SESSION_CLEANUP_INTERVAL};
use crate::session::errors::SessionError;
use crate::session::types::Session;

use super::sweeper::SessionSweeper;

/// Token-keyed session storage.
///
/// `get_by_token` never returns an expired session; expired entries are
/// reported as `SessionError::NotFound`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn store(&self, session: Session) -> Result<(), SessionError>;

    async fn get_by_token(&self, token: &str) -> Result<Session, SessionError>;

    async fn delete(&self, token: &str) -> Result<(), SessionError>;
}

/// Process-local session store: one map behind a reader/writer lock.
///
/// Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        tracing::info!("Creating new in-memory session store");
        Self::default()
    }

    /// Creates a shared store together with its hourly background sweep.
    pub fn start() -> (Arc<Self>, SessionSweeper) {
        Self::start_with_interval(SESSION_CLEANUP_INTERVAL)
    }

    pub fn start_with_interval(period: StdDuration) -> (Arc<Self>, SessionSweeper) {
        let store = Arc::new(Self::new());
        let sweeper = SessionSweeper::spawn(Arc::clone(&store), period);
        (store, sweeper)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Runs one sweep pass against the current time.
    pub async fn sweep_expired(&self) -> usize {
        self.sweep_expired_at(Utc::now()).await
    }

    /// Collects up to one batch of expired tokens under the read lock, then
    /// removes them under the write lock. Each entry is rechecked before
    /// removal so a session re-stored in between survives.
    pub async fn sweep_expired_at(&self, now: DateTime<Utc>) -> usize {
        let expired: Vec<String> = {
            let sessions = self.sessions.read().await;
            sessions
                .iter()
                .filter(|(_, session)| session.is_expired_at(now))
                .map(|(token, _)| token.clone())
                .take(SESSION_CLEANUP_BATCH_SIZE)
                .collect()
        };

        if expired.is_empty() {
            return 0;
        }

        let mut sessions = self.sessions.write().await;
        let mut removed = 0;
        for token in expired {
            if sessions.get(&token).is_some_and(|s| s.is_expired_at(now)) {
                sessions.remove(&token);
                removed += 1;
            }
        }
        tracing::debug!("Swept {} expired sessions", removed);
        removed
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn store(&self, session: Session) -> Result<(), SessionError> {
        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session);
        Ok(())
    }

    async fn get_by_token(&self, token: &str) -> Result<Session, SessionError> {
        let now = Utc::now();
        let found = self.sessions.read().await.get(token).cloned();

        match found {
            Some(session) if !session.is_expired_at(now) => Ok(session),
            Some(_) => {
                // Lazy eviction; the entry may have been replaced since the read.
                let mut sessions = self.sessions.write().await;
                if sessions.get(token).is_some_and(|s| s.is_expired_at(now)) {
                    sessions.remove(token);
                    tracing::debug!("Evicted expired session on access");
                }
                Err(SessionError::NotFound)
            }
            None => Err(SessionError::NotFound),
        }
    }

    async fn delete(&self, token: &str) -> Result<(), SessionError> {
        self.sessions.write().await.remove(token);
        Ok(())
    }
}
