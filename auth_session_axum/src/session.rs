use axum::extract::FromRequestParts;
use http::request::Parts;

use auth_session::Session;

use super::error::ApiError;

/// The session attached by [`crate::middleware::require_auth`].
///
/// Only valid on routes behind that middleware; elsewhere the extraction
/// fails with a 500.
#[derive(Debug, Clone)]
pub struct AuthSession(pub Session);

impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(AuthSession)
            .ok_or_else(|| {
                tracing::error!("AuthSession extracted on a route without require_auth");
                ApiError::internal("internal server error")
            })
    }
}
