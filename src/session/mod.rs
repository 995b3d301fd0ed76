//! Server-side sessions keyed by an opaque cookie token.

mod pg;
mod store;

use std::sync::Arc;

use base64ct::{Base64UrlUnpadded, Encoding};
use rand::{rngs::OsRng, RngCore};
use serde::Serialize;
use sqlx::FromRow;
use time::{Duration, OffsetDateTime};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};
use uuid::Uuid;

pub use pg::PgSessionStore;
pub use store::{MemorySessionStore, SessionStore};

use crate::error::StoreError;

const TOKEN_BYTES: usize = 32;

/// A live login: who the token belongs to and until when.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Session {
    #[serde(skip_serializing)]
    pub token: String,
    pub user_id: Uuid,
    pub user_display_name: String,
    pub expires_at: OffsetDateTime,
}

impl Session {
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        self.expires_at <= now
    }
}

/// Creates, resolves and destroys sessions over a pluggable store.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    ttl: Duration,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn create(&self, user_id: Uuid, display_name: &str) -> Result<Session, StoreError> {
        let session = Session {
            token: generate_token(),
            user_id,
            user_display_name: display_name.to_string(),
            expires_at: OffsetDateTime::now_utc() + self.ttl,
        };
        self.store.insert(&session).await?;
        debug!(user_id = %user_id, expires_at = %session.expires_at, "session created");
        Ok(session)
    }

    /// Unknown and expired tokens are both `None`.
    pub async fn resolve(&self, token: &str) -> Result<Option<Session>, StoreError> {
        let Some(session) = self.store.get(token).await? else {
            return Ok(None);
        };
        if session.is_expired_at(OffsetDateTime::now_utc()) {
            self.store.remove(token).await?;
            debug!(user_id = %session.user_id, "expired session dropped");
            return Ok(None);
        }
        Ok(Some(session))
    }

    pub async fn destroy(&self, token: &str) -> Result<(), StoreError> {
        self.store.remove(token).await
    }

    pub async fn purge_expired(&self) -> Result<u64, StoreError> {
        self.store.purge_expired(OffsetDateTime::now_utc()).await
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    Base64UrlUnpadded::encode_string(&bytes)
}

/// Periodically drops expired sessions until the handle is aborted.
pub fn spawn_sweeper(sessions: SessionManager, every: std::time::Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match sessions.purge_expired().await {
                Ok(0) => {}
                Ok(n) => info!(purged = n, "expired sessions purged"),
                Err(e) => error!(error = %e, "session sweep failed"),
            }
        }
    })
}
