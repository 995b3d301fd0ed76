use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::repo_types::User;
use crate::error::StoreError;

#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Exact match on the stored email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// A taken email surfaces as `StoreError::UniqueViolation`.
    async fn create(
        &self,
        name: Option<&str>,
        email: &str,
        password_hash: &str,
    ) -> Result<User, StoreError>;
}

#[derive(Clone)]
pub struct PgUserRepo {
    db: PgPool,
}

impl PgUserRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn create(
        &self,
        name: Option<&str>,
        email: &str,
        password_hash: &str,
    ) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(|e| StoreError::classify(e, "users.email"))?;
        Ok(user)
    }
}
