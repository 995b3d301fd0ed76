use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use super::Session;
use crate::error::StoreError;

/// Server-side storage for session records, keyed by token.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert(&self, session: &Session) -> Result<(), StoreError>;
    async fn get(&self, token: &str) -> Result<Option<Session>, StoreError>;
    /// Removing an absent token is not an error.
    async fn remove(&self, token: &str) -> Result<(), StoreError>;
    /// Drop every record that expired at or before `now`; returns how many went.
    async fn purge_expired(&self, now: OffsetDateTime) -> Result<u64, StoreError>;
}

/// Process-local session store.
#[derive(Default)]
pub struct MemorySessionStore {
    records: RwLock<HashMap<String, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, session: &Session) -> Result<(), StoreError> {
        self.records
            .write()
            .await
            .insert(session.token.clone(), session.clone());
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<Session>, StoreError> {
        Ok(self.records.read().await.get(token).cloned())
    }

    async fn remove(&self, token: &str) -> Result<(), StoreError> {
        self.records.write().await.remove(token);
        Ok(())
    }

    async fn purge_expired(&self, now: OffsetDateTime) -> Result<u64, StoreError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, s| s.expires_at > now);
        Ok((before - records.len()) as u64)
    }
}
