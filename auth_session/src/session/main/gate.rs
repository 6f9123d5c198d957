use crate::session::errors::{GateError, SessionError};
use crate::session::types::Session;

use super::store::SessionStore;

/// Admits a request only if it carries a token for an active session.
///
/// A missing cookie and an unknown or expired token are indistinguishable to
/// the caller. The gate never creates or deletes sessions.
pub async fn require_auth(
    store: &dyn SessionStore,
    token: Option<&str>,
) -> Result<Session, GateError> {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        tracing::debug!("No session cookie on protected request");
        return Err(GateError::Unauthorized);
    };

    match store.get_by_token(token).await {
        Ok(session) => Ok(session),
        Err(SessionError::NotFound) => {
            tracing::debug!("Session not found or expired");
            Err(GateError::Unauthorized)
        }
        Err(e) => {
            tracing::error!("Failed to look up session: {}", e);
            Err(e.into())
        }
    }
}

/// Admits a request only if it does not carry a token for an active session.
pub async fn require_unauth(
    store: &dyn SessionStore,
    token: Option<&str>,
) -> Result<(), GateError> {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return Ok(());
    };

    match store.get_by_token(token).await {
        Ok(_) => {
            tracing::warn!("Rejected request from an already authenticated client");
            Err(GateError::Forbidden)
        }
        Err(SessionError::NotFound) => Ok(()),
        Err(e) => {
            tracing::error!("Failed to check if session is active: {}", e);
            Err(e.into())
        }
    }
}

/// Reports whether `token` names an active session. Absence is not an error.
pub async fn session_status(
    store: &dyn SessionStore,
    token: Option<&str>,
) -> Result<bool, SessionError> {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return Ok(false);
    };

    match store.get_by_token(token).await {
        Ok(_) => Ok(true),
        Err(SessionError::NotFound) => Ok(false),
        Err(e) => Err(e),
    }
}
