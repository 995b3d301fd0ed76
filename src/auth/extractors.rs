use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, error};

use crate::session::Session;
use crate::state::AppState;

/// The logged-in user, resolved from the session cookie.
pub struct CurrentUser(pub Session);

/// Why a protected request was turned away.
#[derive(Debug)]
pub enum AuthRejection {
    /// Browsers go to the login page; JSON clients get a 401.
    NotAuthenticated { wants_json: bool },
    StoreUnavailable,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::NotAuthenticated { wants_json: false } => {
                Redirect::to("/login").into_response()
            }
            AuthRejection::NotAuthenticated { wants_json: true } => {
                (StatusCode::UNAUTHORIZED, "not authenticated").into_response()
            }
            AuthRejection::StoreUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "Server error – try again").into_response()
            }
        }
    }
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|accept| accept.contains("application/json") && !accept.contains("text/html"))
        .unwrap_or(false)
}

/// Looks up the session named by the cookie, if any.
pub async fn resolve_session(
    state: &AppState,
    jar: &CookieJar,
) -> Result<Option<Session>, AuthRejection> {
    let Some(token) = jar.get(&state.config.session.cookie_name).map(|c| c.value().to_owned())
    else {
        return Ok(None);
    };
    state.sessions.resolve(&token).await.map_err(|e| {
        error!(error = %e, "session lookup failed");
        AuthRejection::StoreUnavailable
    })
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        match resolve_session(state, &jar).await? {
            Some(session) => Ok(CurrentUser(session)),
            None => {
                debug!(uri = %parts.uri, "no valid session");
                Err(AuthRejection::NotAuthenticated {
                    wants_json: wants_json(&parts.headers),
                })
            }
        }
    }
}
