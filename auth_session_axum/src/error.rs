use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde_json::json;

use auth_session::{AuthError, CsrfError, ErrorKind, GateError};

/// JSON error body: `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<GateError> for ApiError {
    fn from(err: GateError) -> Self {
        let status = match err {
            GateError::Unauthorized => StatusCode::UNAUTHORIZED,
            GateError::Forbidden => StatusCode::FORBIDDEN,
            GateError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl From<CsrfError> for ApiError {
    fn from(err: CsrfError) -> Self {
        match err {
            CsrfError::MissingCookie | CsrfError::InvalidToken => {
                Self::bad_request(err.to_string())
            }
            CsrfError::Entropy(_) => Self::internal("failed to get CSRF token"),
        }
    }
}

/// Default mapping; handlers override messages where an endpoint needs to.
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidEmail => Self::bad_request("not valid email"),
            AuthError::InvalidGoogleCode => Self::bad_request("invalid google code"),
            AuthError::InvalidPassword => {
                Self::new(StatusCode::UNAUTHORIZED, "password is incorrect")
            }
            AuthError::UserNotExists => {
                Self::new(StatusCode::UNAUTHORIZED, "username entered does not exist")
            }
            AuthError::UserAlreadyExists => Self::bad_request("user already exists"),
            other => match other.kind() {
                ErrorKind::Transient => Self::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "service temporarily unavailable",
                ),
                _ => Self::internal("internal server error"),
            },
        }
    }
}

/// Helper trait for converting errors to a standard response error format
pub(crate) trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, ApiError>;
}

impl<T> IntoResponseError<T> for Result<T, AuthError> {
    fn into_response_error(self) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::from(e.log()))
    }
}
