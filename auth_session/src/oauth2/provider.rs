use async_trait::async_trait;

use super::errors::OAuth2Error;
use super::types::{OAuthPurpose, OAuthUserInfo};

/// An external identity provider speaking the authorization-code flow.
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    /// Trades a one-time authorization code for the user's identity.
    async fn exchange_code_for_user_info(
        &self,
        code: &str,
        purpose: OAuthPurpose,
    ) -> Result<OAuthUserInfo, OAuth2Error>;

    /// Authorization URL for `purpose`, carrying `state` verbatim.
    fn build_auth_url(&self, purpose: OAuthPurpose, state: &str) -> String;
}
