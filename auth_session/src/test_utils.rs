//! In-memory fakes for the collaborator traits.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::csrf::{CsrfError, CsrfTokenGenerator};
use crate::oauth2::{OAuth2Error, OAuthProvider, OAuthPurpose, OAuthUserInfo};
use crate::session::{Session, SessionError, SessionStore};
use crate::userdb::{Credentials, Profile, ProfileStore, User, UserError, UserStore};

/// Session store whose every operation fails with a storage error.
pub(crate) struct FailingSessionStore;

#[async_trait]
impl SessionStore for FailingSessionStore {
    async fn store(&self, _session: Session) -> Result<(), SessionError> {
        Err(SessionError::Storage("store unavailable".to_string()))
    }

    async fn get_by_token(&self, _token: &str) -> Result<Session, SessionError> {
        Err(SessionError::Storage("store unavailable".to_string()))
    }

    async fn delete(&self, _token: &str) -> Result<(), SessionError> {
        Err(SessionError::Storage("store unavailable".to_string()))
    }
}

pub(crate) struct FixedTokenGenerator(pub(crate) String);

impl CsrfTokenGenerator for FixedTokenGenerator {
    fn generate_token(&self) -> Result<String, CsrfError> {
        Ok(self.0.clone())
    }
}

pub(crate) struct FailingTokenGenerator;

impl CsrfTokenGenerator for FailingTokenGenerator {
    fn generate_token(&self) -> Result<String, CsrfError> {
        Err(CsrfError::Entropy("rng unavailable".to_string()))
    }
}

#[derive(Default)]
struct UserTable {
    users: Vec<User>,
    // (provider_name, subject_id, user_id)
    links: Vec<(String, String, i64)>,
}

/// User and profile store backed by a vector, counting every call.
#[derive(Default)]
pub(crate) struct FakeUserStore {
    table: Mutex<UserTable>,
    calls: AtomicUsize,
    fail_with: Mutex<Option<UserError>>,
}

impl FakeUserStore {
    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn fail_with(&self, err: UserError) {
        *self.fail_with.lock().unwrap() = Some(err);
    }

    fn enter(&self) -> Result<std::sync::MutexGuard<'_, UserTable>, UserError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.fail_with.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.table.lock().unwrap())
    }

    fn insert(
        table: &mut UserTable,
        email: &str,
        hash: Option<String>,
        name: Option<String>,
    ) -> Result<i64, UserError> {
        if table.users.iter().any(|u| u.email == email) {
            return Err(UserError::AlreadyExists);
        }
        let id = table.users.len() as i64 + 1;
        table.users.push(User {
            id,
            email: email.to_string(),
            password_hash: hash,
            full_name: name,
            phone: None,
        });
        Ok(id)
    }
}

#[async_trait]
impl UserStore for FakeUserStore {
    async fn create_by_credentials(&self, credentials: &Credentials) -> Result<(), UserError> {
        let mut table = self.enter()?;
        Self::insert(
            &mut table,
            &credentials.email,
            Some(credentials.password_hash.clone()),
            None,
        )?;
        Ok(())
    }

    async fn create_by_oauth_info(&self, info: &OAuthUserInfo) -> Result<(), UserError> {
        let mut table = self.enter()?;
        if table
            .links
            .iter()
            .any(|(p, s, _)| *p == info.provider_name && *s == info.subject_id)
        {
            return Err(UserError::AlreadyExists);
        }
        let id = Self::insert(&mut table, &info.email, None, Some(info.full_name.clone()))?;
        table
            .links
            .push((info.provider_name.clone(), info.subject_id.clone(), id));
        Ok(())
    }

    async fn get_by_email(&self, email: &str) -> Result<User, UserError> {
        let table = self.enter()?;
        table
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(UserError::NotFound)
    }

    async fn get_by_oauth_info(&self, info: &OAuthUserInfo) -> Result<User, UserError> {
        let table = self.enter()?;
        let user_id = table
            .links
            .iter()
            .find(|(p, s, _)| *p == info.provider_name && *s == info.subject_id)
            .map(|(_, _, id)| *id)
            .ok_or(UserError::NotFound)?;
        table
            .users
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or(UserError::NotFound)
    }
}

#[async_trait]
impl ProfileStore for FakeUserStore {
    async fn get_profile(&self, user_id: i64) -> Result<Profile, UserError> {
        let table = self.enter()?;
        table
            .users
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .map(Profile::from)
            .ok_or(UserError::NotFound)
    }

    async fn update_profile(&self, profile: &Profile) -> Result<(), UserError> {
        let mut table = self.enter()?;
        if table
            .users
            .iter()
            .any(|u| u.email == profile.email && u.id != profile.user_id)
        {
            return Err(UserError::AlreadyExists);
        }
        let user = table
            .users
            .iter_mut()
            .find(|u| u.id == profile.user_id)
            .ok_or(UserError::NotFound)?;
        user.email = profile.email.clone();
        user.full_name = (!profile.full_name.is_empty()).then(|| profile.full_name.clone());
        user.phone = (!profile.phone.is_empty()).then(|| profile.phone.clone());
        Ok(())
    }
}

/// Provider returning a configurable result and recording each exchange.
pub(crate) struct FakeOAuthProvider {
    response: Mutex<Result<OAuthUserInfo, OAuth2Error>>,
    exchanges: Mutex<Vec<(String, OAuthPurpose)>>,
}

impl Default for FakeOAuthProvider {
    fn default() -> Self {
        Self {
            response: Mutex::new(Err(OAuth2Error::Rejected("no response configured".to_string()))),
            exchanges: Mutex::new(Vec::new()),
        }
    }
}

impl FakeOAuthProvider {
    pub(crate) fn respond_with(&self, response: Result<OAuthUserInfo, OAuth2Error>) {
        *self.response.lock().unwrap() = response;
    }

    pub(crate) fn exchanges(&self) -> Vec<(String, OAuthPurpose)> {
        self.exchanges.lock().unwrap().clone()
    }
}

#[async_trait]
impl OAuthProvider for FakeOAuthProvider {
    async fn exchange_code_for_user_info(
        &self,
        code: &str,
        purpose: OAuthPurpose,
    ) -> Result<OAuthUserInfo, OAuth2Error> {
        self.exchanges
            .lock()
            .unwrap()
            .push((code.to_string(), purpose));
        self.response.lock().unwrap().clone()
    }

    fn build_auth_url(&self, purpose: OAuthPurpose, state: &str) -> String {
        format!("https://provider.test/auth?purpose={purpose}&state={state}")
    }
}
