mod gate;
mod store;
mod sweeper;


pub use gate::{require_auth, require_unauth, session_status};
pub use store::{InMemorySessionStore, SessionStore};
pub use sweeper::SessionSweeper;
