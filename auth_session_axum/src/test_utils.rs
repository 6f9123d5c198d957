//! Shared fixtures for handler and middleware tests.

use async_trait::async_trait;
use axum::{body::Body, response::Response};
use http::header::SET_COOKIE;
use serde_json::Value;
use std::sync::Arc;

use auth_session::{
    AuthUseCase, CsrfService, InMemorySessionStore, OAuth2Error, OAuthProvider, OAuthPurpose,
    OAuthUserInfo, ProfileUseCase, RandomTokenGenerator, SessionStore, SqliteUserStore,
};

use crate::AppState;

pub(crate) const FRONTEND: &str = "http://front.test";
pub(crate) const GOOGLE_CODE: &str = "valid-code";
pub(crate) const OFFLINE_CODE: &str = "offline-code";

/// Answers [`GOOGLE_CODE`] with a fixed identity, [`OFFLINE_CODE`] with a
/// transport failure, and rejects everything else.
pub(crate) struct FakeGoogle;

pub(crate) fn google_user() -> OAuthUserInfo {
    OAuthUserInfo {
        subject_id: "google-sub-1".to_string(),
        email: "google.user@example.com".to_string(),
        full_name: "Google User".to_string(),
        provider_name: "google".to_string(),
    }
}

#[async_trait]
impl OAuthProvider for FakeGoogle {
    async fn exchange_code_for_user_info(
        &self,
        code: &str,
        _purpose: OAuthPurpose,
    ) -> Result<OAuthUserInfo, OAuth2Error> {
        match code {
            GOOGLE_CODE => Ok(google_user()),
            OFFLINE_CODE => Err(OAuth2Error::Transport("connection refused".to_string())),
            _ => Err(OAuth2Error::Rejected("invalid_grant".to_string())),
        }
    }

    fn build_auth_url(&self, purpose: OAuthPurpose, state: &str) -> String {
        format!("https://provider.test/auth?purpose={purpose}&state={state}")
    }
}

/// Fresh in-memory session store and SQLite database per call.
pub(crate) async fn test_state() -> AppState {
    let users = Arc::new(
        SqliteUserStore::connect("sqlite::memory:")
            .await
            .expect("in-memory database should open"),
    );
    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let tokens = Arc::new(RandomTokenGenerator);

    let auth = AuthUseCase::new(users.clone(), sessions.clone(), Arc::new(FakeGoogle), tokens)
        .with_bcrypt_cost(4);
    let profiles = ProfileUseCase::new(users);

    AppState {
        cookie_secure: None,
        ..AppState::new(auth, profiles, sessions, CsrfService::default())
    }
    .with_frontend_url(FRONTEND)
}

pub(crate) async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

pub(crate) fn set_cookie_values(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

/// Value of the `name` cookie set by `response`, if any.
pub(crate) fn set_cookie(response: &Response<Body>, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    set_cookie_values(response).into_iter().find_map(|cookie| {
        cookie
            .strip_prefix(&prefix)
            .and_then(|rest| rest.split(';').next())
            .map(str::to_string)
    })
}
