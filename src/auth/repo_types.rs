use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // argon2 PHC string, not exposed
    pub created_at: OffsetDateTime,
}

impl User {
    /// Name shown in the UI: the user's name, or the local part of the email.
    pub fn display_name(&self) -> String {
        display_name(self.name.as_deref(), &self.email)
    }
}

pub(crate) fn display_name(name: Option<&str>, email: &str) -> String {
    match name.map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => email.split('@').next().unwrap_or(email).to_string(),
    }
}
