use regex::Regex;
use std::sync::{Arc, LazyLock};
use uuid::Uuid;

use super::errors::AuthError;
use super::password::{hash_password, verify_password};
use crate::csrf::CsrfTokenGenerator;
use crate::oauth2::{OAuthProvider, OAuthPurpose};
use crate::session::{Session, SessionStore, session_lifetime};
use crate::userdb::{Credentials, UserStore};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is valid")
});

pub(crate) fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Email and Google sign-up, log-in and log-out.
///
/// Sign-up never logs the user in; a successful log-in always creates a new,
/// independent session.
#[derive(Clone)]
pub struct AuthUseCase {
    users: Arc<dyn UserStore>,
    sessions: Arc<dyn SessionStore>,
    oauth: Arc<dyn OAuthProvider>,
    tokens: Arc<dyn CsrfTokenGenerator>,
    bcrypt_cost: u32,
}

impl AuthUseCase {
    pub fn new(
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
        oauth: Arc<dyn OAuthProvider>,
        tokens: Arc<dyn CsrfTokenGenerator>,
    ) -> Self {
        Self {
            users,
            sessions,
            oauth,
            tokens,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    #[tracing::instrument(skip(self, password))]
    pub async fn sign_up_with_email(&self, email: &str, password: &str) -> Result<(), AuthError> {
        if !is_valid_email(email) {
            return Err(AuthError::InvalidEmail);
        }

        let password_hash = hash_password(password, self.bcrypt_cost).await?;
        self.users
            .create_by_credentials(&Credentials {
                email: email.to_string(),
                password_hash,
            })
            .await?;

        tracing::info!("User created with email credentials");
        Ok(())
    }

    #[tracing::instrument(skip(self, password))]
    pub async fn log_in_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let user = self.users.get_by_email(email).await?;

        if !verify_password(password, user.password_hash.as_deref()).await? {
            return Err(AuthError::InvalidPassword);
        }

        self.create_session(user.id).await
    }

    #[tracing::instrument(skip(self, code))]
    pub async fn log_in_with_google(&self, code: &str) -> Result<Session, AuthError> {
        if code.is_empty() {
            return Err(AuthError::InvalidGoogleCode);
        }

        let info = self
            .oauth
            .exchange_code_for_user_info(code, OAuthPurpose::Login)
            .await?;
        let user = self.users.get_by_oauth_info(&info).await?;

        self.create_session(user.id).await
    }

    #[tracing::instrument(skip(self, code))]
    pub async fn sign_up_with_google(&self, code: &str) -> Result<(), AuthError> {
        if code.is_empty() {
            return Err(AuthError::InvalidGoogleCode);
        }

        let info = self
            .oauth
            .exchange_code_for_user_info(code, OAuthPurpose::Signup)
            .await?;
        self.users.create_by_oauth_info(&info).await?;

        tracing::info!("User created with {} account", info.provider_name);
        Ok(())
    }

    /// Returns `(authorization_url, state)`. The caller must hand `state` to
    /// the browser as the `state` cookie.
    pub fn get_google_auth_url(
        &self,
        purpose: OAuthPurpose,
    ) -> Result<(String, String), AuthError> {
        let state = self.tokens.generate_token()?;
        let url = self.oauth.build_auth_url(purpose, &state);
        Ok((url, state))
    }

    pub async fn log_out(&self, session: &Session) -> Result<(), AuthError> {
        self.sessions.delete(&session.token).await?;
        tracing::debug!("Session deleted for user {}", session.user_id);
        Ok(())
    }

    pub async fn create_session(&self, user_id: i64) -> Result<Session, AuthError> {
        let session = Session::new(Uuid::new_v4().to_string(), user_id, session_lifetime());
        self.sessions.store(session.clone()).await?;
        tracing::debug!("Session created for user {}", user_id);
        Ok(session)
    }
}
