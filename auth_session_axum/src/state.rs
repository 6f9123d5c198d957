use http::HeaderMap;
use http::Uri;
use std::sync::Arc;

use auth_session::{AuthUseCase, CsrfService, ProfileUseCase, SessionStore};

use super::config::{AUTH_COOKIE_SECURE, FRONTEND_URL};

/// Shared application state handed to every handler and middleware.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthUseCase,
    pub profiles: ProfileUseCase,
    pub sessions: Arc<dyn SessionStore>,
    pub csrf: CsrfService,
    pub frontend_url: String,
    pub cookie_secure: Option<bool>,
}

impl AppState {
    pub fn new(
        auth: AuthUseCase,
        profiles: ProfileUseCase,
        sessions: Arc<dyn SessionStore>,
        csrf: CsrfService,
    ) -> Self {
        Self {
            auth,
            profiles,
            sessions,
            csrf,
            frontend_url: FRONTEND_URL.clone(),
            cookie_secure: *AUTH_COOKIE_SECURE,
        }
    }

    pub fn with_frontend_url(mut self, url: impl Into<String>) -> Self {
        self.frontend_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = Some(secure);
        self
    }

    /// Whether cookies on this response should carry `Secure`.
    ///
    /// Uses the configured override, else whether the request arrived over
    /// TLS directly or through a proxy reporting `X-Forwarded-Proto: https`.
    pub(crate) fn secure_cookies(&self, headers: &HeaderMap, uri: &Uri) -> bool {
        self.cookie_secure.unwrap_or_else(|| {
            uri.scheme_str() == Some("https")
                || headers
                    .get("x-forwarded-proto")
                    .and_then(|v| v.to_str().ok())
                    .is_some_and(|v| v.eq_ignore_ascii_case("https"))
        })
    }
}
