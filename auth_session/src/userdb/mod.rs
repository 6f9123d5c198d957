mod errors;
mod storage;
mod store;
mod types;

pub use errors::UserError;
pub use storage::SqliteUserStore;
pub use store::{ProfileStore, UserStore};
pub use types::{Credentials, Profile, User};
