use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OAuth2Error {
    #[error("invalid purpose: {0}")]
    InvalidPurpose(String),

    /// The provider answered but refused the request (bad code, revoked grant).
    #[error("Provider rejected request: {0}")]
    Rejected(String),

    /// Network failure or timeout talking to the provider.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl OAuth2Error {
    /// Whether retrying the same request later may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Reasons an OAuth callback is refused before any code exchange.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OAuthCallbackError {
    #[error("code parameter is required")]
    MissingCode,

    #[error("state parameter is required")]
    MissingState,

    #[error("state cookie is required")]
    MissingStateCookie,

    #[error("state cookie is invalid")]
    StateMismatch,
}
