use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use auth_session::{
    CSRF_COOKIE_MAX_AGE, CSRF_COOKIE_NAME, CSRF_HEADER_NAME, CsrfService, SESSION_COOKIE_NAME,
};

use super::cookies::{CookieOptions, cookie_value, header_set_cookie};
use super::error::ApiError;
use super::state::AppState;

fn session_token(req: &Request) -> Option<String> {
    cookie_value(req.headers(), SESSION_COOKIE_NAME.as_str())
}

/// Rejects requests without an active session; otherwise stores the
/// [`auth_session::Session`] in request extensions for [`crate::AuthSession`].
pub async fn require_auth(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let token = session_token(&req);
    match auth_session::require_auth(state.sessions.as_ref(), token.as_deref()).await {
        Ok(session) => {
            req.extensions_mut().insert(session);
            next.run(req).await
        }
        Err(err) => ApiError::from(err).into_response(),
    }
}

/// Rejects requests that already carry an active session.
pub async fn require_unauth(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let token = session_token(&req);
    match auth_session::require_unauth(state.sessions.as_ref(), token.as_deref()).await {
        Ok(()) => next.run(req).await,
        Err(err) => ApiError::from(err).into_response(),
    }
}

/// Double-submit check: the `csrf_token` cookie must equal the
/// `X-CSRF-Token` header on state-changing methods.
pub async fn require_csrf_token(req: Request, next: Next) -> Response {
    let cookie = cookie_value(req.headers(), CSRF_COOKIE_NAME.as_str());
    let header = req
        .headers()
        .get(CSRF_HEADER_NAME)
        .and_then(|h| h.to_str().ok());

    match CsrfService::check_request(req.method(), cookie.as_deref(), header) {
        Ok(()) => next.run(req).await,
        Err(err) => ApiError::from(err).into_response(),
    }
}

/// Issues a fresh script-readable `csrf_token` cookie on the response.
pub async fn set_csrf_token(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let token = match state.csrf.issue_token() {
        Ok(token) => token,
        Err(err) => return ApiError::from(err).into_response(),
    };
    let options = CookieOptions {
        http_only: false,
        secure: state.secure_cookies(req.headers(), req.uri()),
    };

    let mut response = next.run(req).await;
    if let Err(err) = header_set_cookie(
        response.headers_mut(),
        CSRF_COOKIE_NAME.as_str(),
        &token,
        CSRF_COOKIE_MAX_AGE,
        options,
    ) {
        return err.into_response();
    }
    response
}
