use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Token operations bound to one signing secret and one token lifetime.
///
/// Built once from configuration and shared by reference; it holds no
/// mutable state. Credential hashing lives in [`crate::PasswordHasher`].
pub struct Authenticator {
    jwt_handler: JwtHandler,
    token_ttl: Duration,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for HS256 signing
    /// * `token_ttl` - Lifetime of issued and refreshed tokens
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        Self {
            jwt_handler: JwtHandler::new(jwt_secret),
            token_ttl,
        }
    }

    /// Issue a signed token expiring `token_ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue_token(&self, user_id: i64, email: &str, is_admin: bool) -> Result<String, JwtError> {
        let claims = Claims::for_account(user_id, email, is_admin, self.token_ttl);
        self.jwt_handler.encode(&claims)
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    /// * `InvalidToken` - Bad signature, malformed, or expired
    pub fn parse_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode::<Claims>(token)
    }

    /// Reissue a still-valid token with a fresh expiry.
    ///
    /// Identity claims are carried over unchanged. There is no revocation
    /// list, so any token that has not yet expired can be refreshed, including
    /// one that has leaked.
    ///
    /// # Errors
    /// * `InvalidToken` - The presented token does not parse
    /// * `EncodingFailed` - Signing the new token failed
    pub fn refresh_token(&self, token: &str) -> Result<String, JwtError> {
        let claims = self.parse_token(token)?;
        self.jwt_handler.encode(&claims.reissued(self.token_ttl))
    }
}
