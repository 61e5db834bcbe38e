use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Access token payload.
///
/// Carries the account identity and admin flag captured at issuance time.
/// Nothing here is persisted; the server re-verifies signature and expiry
/// on every use.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Account identifier
    pub user_id: i64,

    /// Account email at issuance time
    pub email: String,

    /// Admin flag at issuance time
    pub is_admin: bool,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for an account, expiring `ttl` from now.
    ///
    /// # Arguments
    /// * `user_id` - Account identifier
    /// * `email` - Account email
    /// * `is_admin` - Admin flag
    /// * `ttl` - Token lifetime
    pub fn for_account(user_id: i64, email: impl Into<String>, is_admin: bool, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            user_id,
            email: email.into(),
            is_admin,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Same identity with a fresh issuance time and expiry.
    pub fn reissued(&self, ttl: Duration) -> Self {
        Self::for_account(self.user_id, self.email.clone(), self.is_admin, ttl)
    }
}
