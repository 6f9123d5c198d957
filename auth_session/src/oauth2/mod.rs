mod config;
mod errors;
mod main;
mod provider;
mod types;

pub use config::{GoogleOAuthConfig, OAUTH2_STATE_COOKIE_MAX_AGE, OAUTH2_STATE_COOKIE_NAME};
pub use errors::{OAuth2Error, OAuthCallbackError};
pub use main::{GoogleOAuthGateway, validate_oauth_callback};
pub use provider::OAuthProvider;
pub use types::{OAuthPurpose, OAuthUserInfo};
