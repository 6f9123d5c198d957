use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Server-held proof of authentication.
///
/// A session is valid iff it is present in the store and `now < expires_at`.
/// Records are immutable once stored; logout and expiry remove the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: impl Into<String>, user_id: i64, lifetime: Duration) -> Self {
        Self {
            token: token.into(),
            user_id,
            expires_at: Utc::now() + lifetime,
        }
    }

    /// `Expired` starts at `expires_at` itself.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Seconds until expiry, clamped at zero. Used for cookie `Max-Age`.
    pub fn remaining_seconds(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds().max(0)
    }
}
