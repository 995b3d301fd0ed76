use tracing::{info, warn};

use crate::auth::password::{hash_password_blocking, verify_password_blocking};
use crate::error::{AppError, StoreError};
use crate::session::Session;
use crate::state::AppState;

pub(crate) const MISSING_FIELDS: &str = "All fields are required";
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Creates an account and logs it in.
pub async fn register(
    st: &AppState,
    name: &str,
    email: &str,
    password: &str,
) -> Result<Session, AppError> {
    let email = normalize_email(email);
    if email.is_empty() || password.is_empty() {
        return Err(AppError::Validation(MISSING_FIELDS.into()));
    }

    // Best-effort; the unique constraint on users.email is authoritative.
    if st.users.find_by_email(&email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AppError::DuplicateEmail);
    }

    let hash = hash_password_blocking(password.to_owned()).await?;

    let name = name.trim();
    let name = (!name.is_empty()).then_some(name);
    let user = match st.users.create(name, &email, &hash).await {
        Ok(u) => u,
        Err(StoreError::UniqueViolation(_)) => {
            warn!(email = %email, "email registered concurrently");
            return Err(AppError::DuplicateEmail);
        }
        Err(e) => return Err(e.into()),
    };

    let session = st.sessions.create(user.id, &user.display_name()).await?;
    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(session)
}

/// Unknown email and wrong password both yield `InvalidCredentials`.
pub async fn login(st: &AppState, email: &str, password: &str) -> Result<Session, AppError> {
    let email = normalize_email(email);
    if email.is_empty() || password.is_empty() {
        return Err(AppError::InvalidCredentials);
    }

    let Some(user) = st.users.find_by_email(&email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(AppError::InvalidCredentials);
    };

    let ok = verify_password_blocking(password.to_owned(), user.password_hash.clone()).await?;
    if !ok {
        warn!(email = %email, user_id = %user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    let session = st.sessions.create(user.id, &user.display_name()).await?;
    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(session)
}

pub async fn logout(st: &AppState, token: &str) -> Result<(), AppError> {
    st.sessions.destroy(token).await?;
    Ok(())
}
