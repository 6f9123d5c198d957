use async_trait::async_trait;

use super::errors::UserError;
use super::types::{Credentials, Profile, User};
use crate::oauth2::OAuthUserInfo;

/// Account lookup and creation.
///
/// Implementations must report absence as `UserError::NotFound` and a
/// duplicate email or OAuth identity as `UserError::AlreadyExists`.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_by_credentials(&self, credentials: &Credentials) -> Result<(), UserError>;

    async fn create_by_oauth_info(&self, info: &OAuthUserInfo) -> Result<(), UserError>;

    async fn get_by_email(&self, email: &str) -> Result<User, UserError>;

    /// Looks up by `(provider_name, subject_id)`; email is not consulted.
    async fn get_by_oauth_info(&self, info: &OAuthUserInfo) -> Result<User, UserError>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self, user_id: i64) -> Result<Profile, UserError>;

    /// Overwrites the profile of `profile.user_id`.
    async fn update_profile(&self, profile: &Profile) -> Result<(), UserError>;
}
