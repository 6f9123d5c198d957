use http::Method;
use std::sync::Arc;
use subtle::ConstantTimeEq;

use super::config::CSRF_TOKEN_BYTES;
use super::errors::CsrfError;
use crate::utils::gen_random_string;

/// Source of unpredictable tokens for CSRF cookies and OAuth `state`.
pub trait CsrfTokenGenerator: Send + Sync {
    fn generate_token(&self) -> Result<String, CsrfError>;
}

/// 32 bytes from the system CSPRNG, standard base64 with padding.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomTokenGenerator;

impl CsrfTokenGenerator for RandomTokenGenerator {
    fn generate_token(&self) -> Result<String, CsrfError> {
        Ok(gen_random_string(CSRF_TOKEN_BYTES)?)
    }
}

/// Stateless double-submit CSRF protection.
///
/// A request is accepted when the token in the `csrf_token` cookie equals the
/// token in the `X-CSRF-Token` header. Nothing is stored server-side.
#[derive(Clone)]
pub struct CsrfService {
    generator: Arc<dyn CsrfTokenGenerator>,
}

impl Default for CsrfService {
    fn default() -> Self {
        Self::new(Arc::new(RandomTokenGenerator))
    }
}

impl CsrfService {
    pub fn new(generator: Arc<dyn CsrfTokenGenerator>) -> Self {
        Self { generator }
    }

    pub fn issue_token(&self) -> Result<String, CsrfError> {
        self.generator.generate_token().inspect_err(|e| {
            tracing::error!("Failed to issue CSRF token: {}", e);
        })
    }

    /// True iff both values are non-empty and identical. Compared in constant time.
    pub fn validate(cookie_token: &str, header_token: &str) -> bool {
        if cookie_token.is_empty() || header_token.is_empty() {
            return false;
        }
        cookie_token.as_bytes().ct_eq(header_token.as_bytes()).into()
    }

    /// Gate for one request. Safe methods always pass.
    pub fn check_request(
        method: &Method,
        cookie_token: Option<&str>,
        header_token: Option<&str>,
    ) -> Result<(), CsrfError> {
        if is_safe_method(method) {
            return Ok(());
        }

        let cookie_token = cookie_token
            .filter(|t| !t.is_empty())
            .ok_or(CsrfError::MissingCookie)?;

        if !Self::validate(cookie_token, header_token.unwrap_or_default()) {
            tracing::warn!("CSRF token mismatch on {} request", method);
            return Err(CsrfError::InvalidToken);
        }
        Ok(())
    }
}

pub fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}
