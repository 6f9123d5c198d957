//! Use cases composing the session store, user store and OAuth2 provider.

mod auth;
mod errors;
mod password;
mod profile;

pub use auth::AuthUseCase;
pub use errors::{AuthError, ErrorKind};
pub use profile::ProfileUseCase;
