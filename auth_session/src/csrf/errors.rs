use thiserror::Error;

use crate::utils::UtilError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CsrfError {
    #[error("failed to generate CSRF token: {0}")]
    Entropy(String),

    #[error("csrf token is required")]
    MissingCookie,

    #[error("invalid CSRF token")]
    InvalidToken,
}

impl From<UtilError> for CsrfError {
    fn from(err: UtilError) -> Self {
        Self::Entropy(err.to_string())
    }
}
