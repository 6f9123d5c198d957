use subtle::ConstantTimeEq;

use crate::oauth2::errors::OAuthCallbackError;

/// Checks the callback query against the `state` cookie and yields the code.
///
/// Checks run in a fixed order: code, state parameter, state cookie, match.
pub fn validate_oauth_callback(
    code: Option<&str>,
    state: Option<&str>,
    state_cookie: Option<&str>,
) -> Result<String, OAuthCallbackError> {
    let code = code
        .filter(|c| !c.is_empty())
        .ok_or(OAuthCallbackError::MissingCode)?;
    let state = state
        .filter(|s| !s.is_empty())
        .ok_or(OAuthCallbackError::MissingState)?;
    let state_cookie = state_cookie
        .filter(|s| !s.is_empty())
        .ok_or(OAuthCallbackError::MissingStateCookie)?;

    if !bool::from(state.as_bytes().ct_eq(state_cookie.as_bytes())) {
        tracing::warn!("OAuth state mismatch");
        return Err(OAuthCallbackError::StateMismatch);
    }

    Ok(code.to_string())
}
