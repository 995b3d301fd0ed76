use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::error;

use crate::{
    auth::extractors::{resolve_session, CurrentUser},
    state::AppState,
    views::{render, DashboardPage, NotFoundPage},
};

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/dashboard", get(dashboard))
        .route("/health", get(health))
}

pub async fn home(State(state): State<AppState>, jar: CookieJar) -> Redirect {
    match resolve_session(&state, &jar).await {
        Ok(Some(_)) => Redirect::to("/dashboard"),
        _ => Redirect::to("/login"),
    }
}

pub async fn dashboard(CurrentUser(user): CurrentUser) -> Response {
    render(&DashboardPage {
        user_name: user.user_display_name,
    })
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => (StatusCode::OK, "ok"),
        Err(err) => {
            error!(error = %err, "health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    }
}

pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, render(&NotFoundPage)).into_response()
}
