use async_trait::async_trait;

use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::authentication::errors::AuthError;

/// Port for token issuance and validation.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Sign a token for the given identity with the configured lifetime.
    fn issue_token(
        &self,
        id: &AccountId,
        email: &EmailAddress,
        is_admin: bool,
    ) -> Result<String, AuthError>;

    /// Verify a token and load the live account it names.
    ///
    /// # Errors
    /// * `InvalidToken` - Bad signature, malformed or expired
    /// * `AccountNotFound` - Account deleted since issuance
    /// * `AccountInactive` - Account deactivated since issuance
    /// * `Database` - Store failure
    async fn validate_token(&self, token: &str) -> Result<Account, AuthError>;

    /// Reissue a still-valid token with a fresh expiry.
    ///
    /// # Errors
    /// * `InvalidToken` - Presented token does not verify
    fn refresh_token(&self, token: &str) -> Result<String, AuthError>;
}
