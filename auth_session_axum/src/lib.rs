//! Axum delivery layer for `auth-session`.
//!
//! Mount [`auth_session_router`] to expose the JSON API, or compose the
//! individual middleware ([`require_auth`], [`require_unauth`],
//! [`require_csrf_token`], [`set_csrf_token`]) on your own routes and pull the
//! caller's session with the [`AuthSession`] extractor.

mod auth;
mod config;
mod cookies;
mod error;
mod middleware;
mod profile;
mod router;
mod session;
mod state;

#[cfg(test)]
mod test_utils;

pub use config::{AUTH_COOKIE_SECURE, AUTH_ROUTE_PREFIX, FRONTEND_URL};
pub use error::ApiError;
pub use middleware::{require_auth, require_csrf_token, require_unauth, set_csrf_token};
pub use router::{auth_session_router, auth_session_router_no_trace};
pub use session::AuthSession;
pub use state::AppState;
