use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    handler::Handler,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
};
use serde_json::{Value, json};

use auth_session::{AuthError, Profile};

use super::config::PROFILE_ROUTE;
use super::error::ApiError;
use super::middleware::{require_auth, require_csrf_token};
use super::session::AuthSession;
use super::state::AppState;

pub(super) fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            PROFILE_ROUTE,
            get(get_profile).put(update_profile.layer(from_fn(require_csrf_token))),
        )
        .route_layer(from_fn_with_state(state.clone(), require_auth))
}

async fn get_profile(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Result<Json<Profile>, ApiError> {
    let profile = state
        .profiles
        .get_profile(session.user_id)
        .await
        .map_err(|e| {
            e.log();
            ApiError::internal("failed to get profile")
        })?;
    Ok(Json(profile))
}

async fn update_profile(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    payload: Result<Json<Profile>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(profile) = payload.map_err(|e| {
        tracing::warn!("Failed to decode request body: {}", e);
        ApiError::bad_request("bad input data")
    })?;

    state
        .profiles
        .update_profile(session.user_id, profile)
        .await
        .map_err(|e| match e.log() {
            AuthError::InvalidEmail => ApiError::bad_request("not valid email"),
            AuthError::UserAlreadyExists => ApiError::bad_request("user already exists"),
            _ => ApiError::internal("failed to update profile"),
        })?;

    Ok(Json(json!({ "message": "profile updated successfully" })))
}
