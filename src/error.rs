use thiserror::Error;

/// Errors surfaced by repositories and session stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(&'static str),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Classify a sqlx error, turning unique violations into `UniqueViolation(what)`.
    pub fn classify(e: sqlx::Error, what: &'static str) -> Self {
        let unique = e
            .as_database_error()
            .map(|db| db.is_unique_violation())
            .unwrap_or(false);
        if unique {
            StoreError::UniqueViolation(what)
        } else {
            StoreError::Database(e)
        }
    }
}

/// Service-level error taxonomy. Handlers turn these into form messages.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("email already in use")]
    DuplicateEmail,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Storage(StoreError::Database(e))
    }
}

impl AppError {
    /// True for faults the user cannot fix; these get logged with detail.
    pub fn is_server_fault(&self) -> bool {
        matches!(self, AppError::Storage(_) | AppError::Internal(_))
    }
}
