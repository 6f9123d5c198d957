//! Session-based authentication core.
//!
//! Provides an in-memory session store with a background expiry sweep,
//! double-submit CSRF tokens, email/password and Google OAuth2 sign-up and
//! log-in, and profile editing. Persistence and providers sit behind traits
//! ([`UserStore`], [`ProfileStore`], [`OAuthProvider`], [`SessionStore`],
//! [`CsrfTokenGenerator`]) so the use cases can run against fakes.
//!
//! HTTP concerns live in the `auth-session-axum` crate.

mod coordination;
mod csrf;
mod oauth2;
mod session;
mod userdb;
mod utils;

#[cfg(test)]
mod test_utils;

pub use coordination::{AuthError, AuthUseCase, ErrorKind, ProfileUseCase};

pub use csrf::{
    CSRF_COOKIE_MAX_AGE, CSRF_COOKIE_NAME, CSRF_HEADER_NAME, CsrfError, CsrfService,
    CsrfTokenGenerator, RandomTokenGenerator, is_safe_method,
};

pub use oauth2::{
    GoogleOAuthConfig, GoogleOAuthGateway, OAUTH2_STATE_COOKIE_MAX_AGE, OAUTH2_STATE_COOKIE_NAME,
    OAuth2Error, OAuthCallbackError, OAuthProvider, OAuthPurpose, OAuthUserInfo,
    validate_oauth_callback,
};

pub use session::{
    GateError, InMemorySessionStore, SESSION_COOKIE_NAME, Session, SessionError, SessionStore,
    SessionSweeper, require_auth, require_unauth, session_lifetime, session_status,
};

pub use userdb::{
    Credentials, Profile, ProfileStore, SqliteUserStore, User, UserError, UserStore,
};
