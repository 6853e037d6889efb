//! Session and admin middleware

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Extension,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::session::{SessionHandle, SESSION_COOKIE};
use crate::AppState;

/// Attach the caller's session to the request, issuing a cookie for new sessions
pub async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let requested = jar
        .get(SESSION_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok());

    let (id, created) = state.sessions.resolve(requested).await;
    request
        .extensions_mut()
        .insert(SessionHandle::new(id, state.sessions.clone()));

    let response = next.run(request).await;
    if !created {
        return response;
    }

    tracing::debug!(session = %id, "issued new session");
    let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (jar.add(cookie), response).into_response()
}

/// Reject requests from sessions that haven't logged in as admin
pub async fn require_admin(
    Extension(session): Extension<SessionHandle>,
    request: Request<Body>,
    next: Next,
) -> Result<Response> {
    if !session.is_admin().await {
        return Err(ApiError::Unauthorized("Admin login required".to_string()));
    }
    Ok(next.run(request).await)
}
