use std::sync::LazyLock;
use std::time::Duration as StdDuration;

use chrono::Duration;

pub static SESSION_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    std::env::var("SESSION_COOKIE_NAME")
        .ok()
        .unwrap_or("auth_token".to_string())
});

/// Fixed session lifetime. There is no refresh or sliding expiration.
pub(crate) const SESSION_LIFETIME_SECS: i64 = 24 * 60 * 60;

pub(crate) const SESSION_CLEANUP_INTERVAL: StdDuration = StdDuration::from_secs(60 * 60);

/// Upper bound on tokens collected per sweep pass, bounding read-lock hold time.
pub(crate) const SESSION_CLEANUP_BATCH_SIZE: usize = 100;

pub fn session_lifetime() -> Duration {
    Duration::seconds(SESSION_LIFETIME_SECS)
}
