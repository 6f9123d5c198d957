use thiserror::Error;

use crate::csrf::CsrfError;
use crate::oauth2::OAuth2Error;
use crate::session::SessionError;
use crate::userdb::UserError;

/// Coarse classification used by delivery layers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Unauthorized,
    Forbidden,
    Transient,
    Internal,
}

/// Errors returned by the authentication and profile use cases.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("email not valid")]
    InvalidEmail,

    #[error("invalid Google code")]
    InvalidGoogleCode,

    #[error("invalid password")]
    InvalidPassword,

    #[error("user not exists")]
    UserNotExists,

    #[error("user already exists")]
    UserAlreadyExists,

    #[error("Session error: {0}")]
    Session(SessionError),

    #[error("OAuth2 error: {0}")]
    OAuth2(OAuth2Error),

    /// User store failure other than not-found or conflict.
    #[error("User error: {0}")]
    User(UserError),

    #[error("CSRF error: {0}")]
    Csrf(CsrfError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidEmail | Self::InvalidGoogleCode => ErrorKind::Validation,
            Self::InvalidPassword => ErrorKind::Unauthorized,
            Self::UserNotExists => ErrorKind::NotFound,
            Self::UserAlreadyExists => ErrorKind::Conflict,
            Self::Session(SessionError::NotFound) => ErrorKind::NotFound,
            Self::Session(SessionError::Storage(_)) => ErrorKind::Transient,
            Self::OAuth2(err) => match err {
                OAuth2Error::InvalidPurpose(_) | OAuth2Error::Rejected(_) => ErrorKind::Validation,
                OAuth2Error::Transport(_) => ErrorKind::Transient,
                OAuth2Error::InvalidResponse(_) | OAuth2Error::Config(_) => ErrorKind::Internal,
            },
            Self::User(_) => ErrorKind::Transient,
            Self::Csrf(CsrfError::Entropy(_)) => ErrorKind::Internal,
            Self::Csrf(_) => ErrorKind::Validation,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Log the error at a level matching its kind and return self
    pub fn log(self) -> Self {
        match self.kind() {
            ErrorKind::Internal | ErrorKind::Transient => tracing::error!("{}", self),
            ErrorKind::Unauthorized | ErrorKind::Forbidden => tracing::warn!("{}", self),
            ErrorKind::Validation | ErrorKind::NotFound | ErrorKind::Conflict => {
                tracing::info!("{}", self)
            }
        }
        self
    }
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound => Self::UserNotExists,
            UserError::AlreadyExists => Self::UserAlreadyExists,
            other => Self::User(other),
        }
    }
}

impl From<SessionError> for AuthError {
    fn from(err: SessionError) -> Self {
        Self::Session(err)
    }
}

impl From<OAuth2Error> for AuthError {
    fn from(err: OAuth2Error) -> Self {
        Self::OAuth2(err)
    }
}

impl From<CsrfError> for AuthError {
    fn from(err: CsrfError) -> Self {
        Self::Csrf(err)
    }
}
