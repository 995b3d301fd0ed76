use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::{error, instrument};

use crate::{
    auth::{
        dto::{LoginForm, RegisterForm},
        services,
    },
    error::AppError,
    session::Session,
    state::AppState,
    views::{render, LoginPage, RegisterPage},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_form).post(login))
        .route("/register", get(register_form).post(register))
        .route("/logout", get(logout))
}

pub(crate) fn session_cookie(state: &AppState, session: &Session) -> Cookie<'static> {
    let cfg = &state.config.session;
    Cookie::build((cfg.cookie_name.clone(), session.token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cfg.cookie_secure)
        .max_age(state.sessions.ttl())
        .build()
}

fn status_for(e: &AppError) -> StatusCode {
    if e.is_server_fault() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    }
}

pub async fn login_form() -> Response {
    render(&LoginPage::default())
}

#[instrument(skip(state, jar, form))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    match services::login(&state, &form.email, &form.password).await {
        Ok(session) => {
            let jar = jar.add(session_cookie(&state, &session));
            (jar, Redirect::to("/dashboard")).into_response()
        }
        Err(e) => {
            let message = match &e {
                AppError::InvalidCredentials => "Invalid email or password",
                _ => {
                    error!(error = %e, "login failed");
                    "Server error – try again"
                }
            };
            let page = LoginPage {
                error: message.into(),
                email: form.email,
            };
            (status_for(&e), render(&page)).into_response()
        }
    }
}

pub async fn register_form() -> Response {
    render(&RegisterPage::default())
}

#[instrument(skip(state, jar, form))]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Response {
    match services::register(&state, &form.name, &form.email, &form.password).await {
        Ok(session) => {
            let jar = jar.add(session_cookie(&state, &session));
            (jar, Redirect::to("/dashboard")).into_response()
        }
        Err(e) => {
            let message = match &e {
                AppError::Validation(m) => m.clone(),
                AppError::DuplicateEmail => "Email already in use".into(),
                _ => {
                    error!(error = %e, "registration failed");
                    "Registration failed".into()
                }
            };
            let page = RegisterPage {
                error: message,
                name: form.name,
                email: form.email,
            };
            (status_for(&e), render(&page)).into_response()
        }
    }
}

#[instrument(skip(state, jar))]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let name = state.config.session.cookie_name.clone();
    if let Some(token) = jar.get(&name).map(|c| c.value().to_owned()) {
        if let Err(e) = services::logout(&state, &token).await {
            error!(error = %e, "session destroy failed");
        }
    }
    let jar = jar.remove(Cookie::build((name, "")).path("/"));
    (jar, Redirect::to("/login")).into_response()
}
