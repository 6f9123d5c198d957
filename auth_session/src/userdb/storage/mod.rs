mod sqlite;

pub use sqlite::SqliteUserStore;
