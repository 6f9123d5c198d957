mod config;
mod errors;
mod main;
mod types;

pub use config::{SESSION_COOKIE_NAME, session_lifetime};
pub use errors::{GateError, SessionError};
pub use main::{
    InMemorySessionStore, SessionStore, SessionSweeper, require_auth, require_unauth,
    session_status,
};
pub use types::Session;
