use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    middleware::{from_fn, from_fn_with_state},
    response::{IntoResponse, Redirect, Response},
    routing::{MethodRouter, get, post},
};
use http::{HeaderMap, StatusCode, Uri};
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::HashMap;

use auth_session::{
    AuthError, OAUTH2_STATE_COOKIE_MAX_AGE, OAUTH2_STATE_COOKIE_NAME, OAuthPurpose,
    SESSION_COOKIE_NAME, Session, session_status, validate_oauth_callback,
};

use super::cookies::{CookieOptions, cookie_value, header_clear_cookie, header_set_cookie};
use super::error::{ApiError, IntoResponseError};
use super::middleware::{require_auth, require_csrf_token, require_unauth, set_csrf_token};
use super::session::AuthSession;
use super::state::AppState;

#[derive(Debug, Deserialize)]
pub(crate) struct AuthRequest {
    email: String,
    password: String,
}

/// Routes mounted under [`crate::AUTH_ROUTE_PREFIX`].
pub(super) fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/signup", public(state, post(signup)))
        .route("/login", public(state, post(login)))
        .route("/google/url", public(state, get(google_auth_url)))
        .route(
            "/google/callback/signup",
            callback(state, get(google_callback_signup)),
        )
        .route(
            "/google/callback/login",
            callback(state, get(google_callback_login)),
        )
        .route(
            "/status",
            get(status).layer(from_fn_with_state(state.clone(), set_csrf_token)),
        )
        .route(
            "/logout",
            post(logout)
                .layer(from_fn_with_state(state.clone(), set_csrf_token))
                .layer(from_fn_with_state(state.clone(), require_auth)),
        )
}

// Outermost first: unauth gate, CSRF check, CSRF issue, handler.
fn public(state: &AppState, route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route
        .layer(from_fn_with_state(state.clone(), set_csrf_token))
        .layer(from_fn(require_csrf_token))
        .layer(from_fn_with_state(state.clone(), require_unauth))
}

// Outermost first: CSRF issue, unauth gate, handler.
fn callback(state: &AppState, route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route
        .layer(from_fn_with_state(state.clone(), require_unauth))
        .layer(from_fn_with_state(state.clone(), set_csrf_token))
}

fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(body)| body).map_err(|e| {
        tracing::warn!("Failed to decode request body: {}", e);
        ApiError::bad_request("bad input data")
    })
}

fn set_session_cookie(
    headers: &mut HeaderMap,
    session: &Session,
    secure: bool,
) -> Result<(), ApiError> {
    header_set_cookie(
        headers,
        SESSION_COOKIE_NAME.as_str(),
        &session.token,
        session.remaining_seconds(),
        CookieOptions {
            http_only: true,
            secure,
        },
    )
}

async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<AuthRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let request = parse_body(payload)?;
    state
        .auth
        .sign_up_with_email(&request.email, &request.password)
        .await
        .into_response_error()?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "user created successfully" })),
    ))
}

async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    payload: Result<Json<AuthRequest>, JsonRejection>,
) -> Result<(HeaderMap, Json<Value>), ApiError> {
    let request = parse_body(payload)?;
    let session = state
        .auth
        .log_in_with_email(&request.email, &request.password)
        .await
        .into_response_error()?;

    let mut response_headers = HeaderMap::new();
    set_session_cookie(
        &mut response_headers,
        &session,
        state.secure_cookies(&headers, &uri),
    )?;

    Ok((
        response_headers,
        Json(json!({ "message": "logged in successfully" })),
    ))
}

async fn google_auth_url(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Result<(HeaderMap, Json<Value>), ApiError> {
    let purpose: OAuthPurpose = params
        .get("purpose")
        .map(String::as_str)
        .unwrap_or_default()
        .parse()
        .map_err(|_| ApiError::bad_request("invalid purpose"))?;

    let (url, oauth_state) = state.auth.get_google_auth_url(purpose).map_err(|e| {
        e.log();
        ApiError::internal("failed to get google auth url")
    })?;

    let mut response_headers = HeaderMap::new();
    header_set_cookie(
        &mut response_headers,
        OAUTH2_STATE_COOKIE_NAME,
        &oauth_state,
        OAUTH2_STATE_COOKIE_MAX_AGE,
        CookieOptions {
            http_only: false,
            secure: state.secure_cookies(&headers, &uri),
        },
    )?;

    Ok((response_headers, Json(json!({ "url": url }))))
}

fn frontend_redirect(state: &AppState, page: &str, key: &str, message: &str) -> Redirect {
    Redirect::to(&format!(
        "{}/{}?{}={}",
        state.frontend_url,
        page,
        key,
        urlencoding::encode(message)
    ))
}

/// Checks the callback query against the `state` cookie, or yields the
/// redirect back to `page` carrying the reason.
fn callback_code(
    state: &AppState,
    page: &str,
    headers: &HeaderMap,
    params: &HashMap<String, String>,
) -> Result<String, Redirect> {
    let state_cookie = cookie_value(headers, OAUTH2_STATE_COOKIE_NAME);
    validate_oauth_callback(
        params.get("code").map(String::as_str),
        params.get("state").map(String::as_str),
        state_cookie.as_deref(),
    )
    .map_err(|e| {
        tracing::warn!("Rejected OAuth callback: {}", e);
        frontend_redirect(state, page, "error", &e.to_string())
    })
}

async fn google_callback_signup(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let code = match callback_code(&state, "signup", &headers, &params) {
        Ok(code) => code,
        Err(redirect) => return redirect.into_response(),
    };

    if let Err(e) = state.auth.sign_up_with_google(&code).await {
        let message = match e.log() {
            AuthError::InvalidGoogleCode => "invalid google code",
            AuthError::UserAlreadyExists => "user already exists",
            _ => "failed to sign up with google",
        };
        return frontend_redirect(&state, "signup", "error", message).into_response();
    }

    let mut response_headers = HeaderMap::new();
    let options = CookieOptions {
        http_only: true,
        secure: state.secure_cookies(&headers, &uri),
    };
    if let Err(e) = header_clear_cookie(&mut response_headers, OAUTH2_STATE_COOKIE_NAME, options)
    {
        return e.into_response();
    }

    (
        response_headers,
        frontend_redirect(&state, "signup", "success", "User created successfully"),
    )
        .into_response()
}

async fn google_callback_login(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let code = match callback_code(&state, "login", &headers, &params) {
        Ok(code) => code,
        Err(redirect) => return redirect.into_response(),
    };

    let session = match state.auth.log_in_with_google(&code).await {
        Ok(session) => session,
        Err(e) => {
            let message = match e.log() {
                AuthError::InvalidGoogleCode => "invalid google code",
                AuthError::UserNotExists => "user not exists",
                _ => "failed to log in with google",
            };
            return frontend_redirect(&state, "login", "error", message).into_response();
        }
    };

    let secure = state.secure_cookies(&headers, &uri);
    let mut response_headers = HeaderMap::new();
    let cookies = set_session_cookie(&mut response_headers, &session, secure).and_then(|_| {
        header_clear_cookie(
            &mut response_headers,
            OAUTH2_STATE_COOKIE_NAME,
            CookieOptions {
                http_only: true,
                secure,
            },
        )
    });
    if let Err(e) = cookies {
        return e.into_response();
    }

    tracing::debug!("User {} logged in with Google", session.user_id);
    (
        response_headers,
        Redirect::to(&format!("{}/profile", state.frontend_url)),
    )
        .into_response()
}

async fn status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let token = cookie_value(&headers, SESSION_COOKIE_NAME.as_str());
    let authenticated = session_status(state.sessions.as_ref(), token.as_deref())
        .await
        .map_err(|e| {
            tracing::error!("Failed to check session: {}", e);
            ApiError::internal("failed to check session")
        })?;

    Ok(Json(json!({ "authenticated": authenticated })))
}

async fn logout(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    headers: HeaderMap,
    uri: Uri,
) -> Result<(HeaderMap, Json<Value>), ApiError> {
    state.auth.log_out(&session).await.map_err(|e| {
        e.log();
        ApiError::internal("failed to log out")
    })?;

    let mut response_headers = HeaderMap::new();
    header_clear_cookie(
        &mut response_headers,
        SESSION_COOKIE_NAME.as_str(),
        CookieOptions {
            http_only: true,
            secure: state.secure_cookies(&headers, &uri),
        },
    )?;

    Ok((
        response_headers,
        Json(json!({ "message": "logged out successfully" })),
    ))
}
