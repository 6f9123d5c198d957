use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("session not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Outcome of the access gates. Messages stay generic to avoid user enumeration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("session is active")]
    Forbidden,

    #[error("failed to check if session is active")]
    Internal(String),
}

impl From<SessionError> for GateError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound => Self::Unauthorized,
            SessionError::Storage(msg) => Self::Internal(msg),
        }
    }
}
