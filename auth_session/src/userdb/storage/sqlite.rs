use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

use crate::oauth2::OAuthUserInfo;
use crate::userdb::errors::UserError;
use crate::userdb::store::{ProfileStore, UserStore};
use crate::userdb::types::{Credentials, Profile, User};

/// `users` and `oauth_accounts` tables in SQLite.
#[derive(Debug, Clone)]
pub struct SqliteUserStore {
    pool: Pool<Sqlite>,
}

impl SqliteUserStore {
    /// Opens `database_url`, creating the file if needed, and ensures the schema.
    pub async fn connect(database_url: &str) -> Result<Self, UserError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| UserError::Storage(format!("invalid database URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every connection to `:memory:` is a separate database, so keep
        // exactly one and never recycle it.
        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options.connect_with(options).await?;

        let store = Self::new(pool);
        store.init().await?;
        Ok(store)
    }

    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    pub async fn init(&self) -> Result<(), UserError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT,
                full_name TEXT,
                phone TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS oauth_accounts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                provider_name TEXT NOT NULL,
                sub TEXT NOT NULL,
                UNIQUE (provider_name, sub)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        tracing::debug!("User tables ready");
        Ok(())
    }

    async fn get_by_id(&self, user_id: i64) -> Result<User, UserError> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, full_name, phone FROM users WHERE id = ?",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(UserError::from)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn create_by_credentials(&self, credentials: &Credentials) -> Result<(), UserError> {
        sqlx::query("INSERT INTO users (email, password_hash) VALUES (?, ?)")
            .bind(&credentials.email)
            .bind(&credentials.password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| log_write_error("create user with credentials", e))?;
        Ok(())
    }

    async fn create_by_oauth_info(&self, info: &OAuthUserInfo) -> Result<(), UserError> {
        let mut tx = self.pool.begin().await?;

        let user_id = sqlx::query("INSERT INTO users (email, full_name) VALUES (?, ?)")
            .bind(&info.email)
            .bind(non_empty(&info.full_name))
            .execute(&mut *tx)
            .await
            .map_err(|e| log_write_error("create user with oauth info", e))?
            .last_insert_rowid();

        sqlx::query("INSERT INTO oauth_accounts (user_id, provider_name, sub) VALUES (?, ?, ?)")
            .bind(user_id)
            .bind(&info.provider_name)
            .bind(&info.subject_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| log_write_error("create oauth account", e))?;

        // Dropping `tx` on any early return rolls back.
        tx.commit().await?;
        Ok(())
    }

    async fn get_by_email(&self, email: &str) -> Result<User, UserError> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, full_name, phone FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(UserError::from)
    }

    async fn get_by_oauth_info(&self, info: &OAuthUserInfo) -> Result<User, UserError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.email, u.password_hash, u.full_name, u.phone
            FROM oauth_accounts oa
            JOIN users u ON oa.user_id = u.id
            WHERE oa.provider_name = ? AND oa.sub = ?
            "#,
        )
        .bind(&info.provider_name)
        .bind(&info.subject_id)
        .fetch_one(&self.pool)
        .await
        .map_err(UserError::from)
    }
}

#[async_trait]
impl ProfileStore for SqliteUserStore {
    async fn get_profile(&self, user_id: i64) -> Result<Profile, UserError> {
        Ok(self.get_by_id(user_id).await?.into())
    }

    async fn update_profile(&self, profile: &Profile) -> Result<(), UserError> {
        let result =
            sqlx::query("UPDATE users SET email = ?, full_name = ?, phone = ? WHERE id = ?")
                .bind(&profile.email)
                .bind(non_empty(&profile.full_name))
                .bind(non_empty(&profile.phone))
                .bind(profile.user_id)
                .execute(&self.pool)
                .await
                .map_err(|e| log_write_error("update profile", e))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound);
        }
        Ok(())
    }
}

fn log_write_error(action: &str, err: sqlx::Error) -> UserError {
    let err = UserError::from(err);
    if let UserError::Storage(msg) = &err {
        tracing::error!("Failed to {}: {}", action, msg);
    }
    err
}
