use std::sync::LazyLock;

use super::errors::OAuth2Error;

pub(crate) static OAUTH2_AUTH_URL: LazyLock<String> = LazyLock::new(|| {
    std::env::var("OAUTH2_AUTH_URL")
        .ok()
        .unwrap_or("https://accounts.google.com/o/oauth2/auth".to_string())
});

pub(crate) static OAUTH2_TOKEN_URL: LazyLock<String> = LazyLock::new(|| {
    std::env::var("OAUTH2_TOKEN_URL")
        .ok()
        .unwrap_or("https://oauth2.googleapis.com/token".to_string())
});

pub(crate) static OAUTH2_USERINFO_URL: LazyLock<String> = LazyLock::new(|| {
    std::env::var("OAUTH2_USERINFO_URL")
        .ok()
        .unwrap_or("https://www.googleapis.com/oauth2/v3/userinfo".to_string())
});

pub(crate) const OAUTH2_SCOPES: &str =
    "https://www.googleapis.com/auth/userinfo.email https://www.googleapis.com/auth/userinfo.profile";

pub(crate) const GOOGLE_PROVIDER_NAME: &str = "google";

pub(crate) const OAUTH2_HTTP_TIMEOUT_SECS: u64 = 30;

pub const OAUTH2_STATE_COOKIE_NAME: &str = "state";

pub const OAUTH2_STATE_COOKIE_MAX_AGE: i64 = 10 * 60;

/// Credentials of the registered Google OAuth client.
///
/// `redirect_url` is the callback base; the purpose is appended as the last
/// path segment (`{redirect_url}/login`, `{redirect_url}/signup`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
}

impl GoogleOAuthConfig {
    pub fn from_env() -> Result<Self, OAuth2Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, OAuth2Error> {
        let first = |keys: &[&str]| -> Result<String, OAuth2Error> {
            keys.iter()
                .find_map(|k| lookup(k).filter(|v| !v.is_empty()))
                .ok_or_else(|| OAuth2Error::Config(format!("{} must be set", keys[0])))
        };

        Ok(Self {
            client_id: first(&["GOOGLE_CLIENT_ID", "OAUTH_GOOGLE_CLIENT_ID"])?,
            client_secret: first(&["GOOGLE_CLIENT_SECRET", "OAUTH_GOOGLE_CLIENT_SECRET"])?,
            redirect_url: first(&["OAUTH_REDIRECT_URL", "OAUTH_GOOGLE_REDIRECT_URL"])?
                .trim_end_matches('/')
                .to_string(),
        })
    }
}
