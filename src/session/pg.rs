use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;

use super::{Session, SessionStore};
use crate::error::StoreError;

/// Session records in the `sessions` table; survives restarts.
#[derive(Clone)]
pub struct PgSessionStore {
    db: PgPool,
}

impl PgSessionStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn insert(&self, session: &Session) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (token, user_id, user_display_name, expires_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&session.token)
        .bind(session.user_id)
        .bind(&session.user_display_name)
        .bind(session.expires_at)
        .execute(&self.db)
        .await
        .map_err(|e| StoreError::classify(e, "sessions.token"))?;
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<Session>, StoreError> {
        let row = sqlx::query_as::<_, Session>(
            r#"
            SELECT token, user_id, user_display_name, expires_at
              FROM sessions
             WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn remove(&self, token: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    async fn purge_expired(&self, now: OffsetDateTime) -> Result<u64, StoreError> {
        let done = sqlx::query("DELETE FROM sessions WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.db)
            .await?;
        Ok(done.rows_affected())
    }
}
