use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::OAuth2Error;

/// Identity returned by a provider after a successful code exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthUserInfo {
    pub subject_id: String,
    pub email: String,
    pub full_name: String,
    pub provider_name: String,
}

/// Which flow an authorization request belongs to. Selects the redirect URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OAuthPurpose {
    Login,
    Signup,
}

impl OAuthPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Signup => "signup",
        }
    }
}

impl fmt::Display for OAuthPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OAuthPurpose {
    type Err = OAuth2Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "login" => Ok(Self::Login),
            "signup" => Ok(Self::Signup),
            other => Err(OAuth2Error::InvalidPurpose(other.to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponse {
    pub(super) access_token: String,
}

/// Subset of the Google OpenID userinfo (v3) document.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct GoogleUserInfo {
    pub(super) sub: String,
    pub(super) email: String,
    #[serde(default)]
    pub(super) name: Option<String>,
}
