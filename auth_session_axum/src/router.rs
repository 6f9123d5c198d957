//! Combined router for the authentication and profile endpoints

use axum::{Json, Router, routing::get};
use http::{
    HeaderName, StatusCode,
    header::{COOKIE, SET_COOKIE},
};
use serde_json::{Value, json};
use tower_http::LatencyUnit;
use tower_http::sensitive_headers::SetSensitiveHeadersLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::config::AUTH_ROUTE_PREFIX;
use super::state::AppState;

/// Build the full HTTP surface:
/// - {AUTH_ROUTE_PREFIX}/signup, /login, /logout, /status, /google/...
/// - /api/profile
/// - /ping
///
/// Anything else answers 404 `{"message":"not found"}`.
pub fn auth_session_router(state: AppState) -> Router {
    auth_session_router_no_trace(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(true),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .layer(credential_headers_layer())
}

/// Marks session and CSRF credentials sensitive so traced headers show them
/// redacted. Must wrap the trace layer.
fn credential_headers_layer() -> SetSensitiveHeadersLayer {
    SetSensitiveHeadersLayer::new([
        COOKIE,
        SET_COOKIE,
        HeaderName::from_static(CSRF_HEADER_NAME_LOWER),
    ])
}

// `HeaderName::from_static` wants the lowercase form of `CSRF_HEADER_NAME`.
const CSRF_HEADER_NAME_LOWER: &str = "x-csrf-token";

/// Same as [`auth_session_router`] without the HTTP tracing layer.
pub fn auth_session_router_no_trace(state: AppState) -> Router {
    Router::new()
        .nest(AUTH_ROUTE_PREFIX.as_str(), super::auth::router(&state))
        .merge(super::profile::router(&state))
        .route("/ping", get(ping))
        .fallback(not_found)
        .with_state(state)
}

async fn ping() -> Json<Value> {
    Json(json!({ "message": "pong" }))
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "not found" })))
}
