use std::sync::Arc;

use super::auth::is_valid_email;
use super::errors::AuthError;
use crate::userdb::{Profile, ProfileStore};

/// Read and edit the profile of the authenticated user.
#[derive(Clone)]
pub struct ProfileUseCase {
    profiles: Arc<dyn ProfileStore>,
}

impl ProfileUseCase {
    pub fn new(profiles: Arc<dyn ProfileStore>) -> Self {
        Self { profiles }
    }

    pub async fn get_profile(&self, user_id: i64) -> Result<Profile, AuthError> {
        Ok(self.profiles.get_profile(user_id).await?)
    }

    /// Writes `profile` for `user_id`; any id carried in `profile` is ignored.
    #[tracing::instrument(skip(self, profile))]
    pub async fn update_profile(&self, user_id: i64, profile: Profile) -> Result<(), AuthError> {
        if !is_valid_email(&profile.email) {
            return Err(AuthError::InvalidEmail);
        }

        self.profiles
            .update_profile(&Profile { user_id, ..profile })
            .await?;
        tracing::debug!("Profile updated");
        Ok(())
    }
}
