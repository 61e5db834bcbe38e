use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AccountPage;
use crate::account::models::CreateAccountCommand;
use crate::account::models::EmailAddress;
use crate::account::models::LoginOutcome;
use crate::account::models::NewAccount;
use crate::account::models::PageRequest;
use crate::account::models::StoreStats;
use crate::account::models::UpdateAccountCommand;
use crate::account::models::Username;

/// Port for account lifecycle operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Self-registration. The new account is always active and never admin.
    ///
    /// # Errors
    /// * `EmailTaken` - Email belongs to another account
    /// * `UsernameTaken` - Username belongs to another account
    /// * `Database` - Store failure
    async fn register(&self, command: CreateAccountCommand) -> Result<Account, AccountError>;

    /// Admin-initiated creation, optionally granting admin.
    ///
    /// # Errors
    /// Same as [`AccountServicePort::register`].
    async fn create_account(
        &self,
        command: CreateAccountCommand,
        is_admin: bool,
    ) -> Result<Account, AccountError>;

    /// # Errors
    /// * `NotFound` - Account absent or soft-deleted
    /// * `Database` - Store failure
    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError>;

    /// Apply the fields present in `command`, leave the rest untouched.
    ///
    /// # Errors
    /// * `NotFound` - Account absent or soft-deleted
    /// * `EmailTaken` / `UsernameTaken` - Changed value belongs to another account
    /// * `Database` - Store failure
    async fn update_account(
        &self,
        id: &AccountId,
        command: UpdateAccountCommand,
    ) -> Result<Account, AccountError>;

    /// Soft-delete.
    ///
    /// # Errors
    /// * `NotFound` - Account already absent
    /// * `Database` - Store failure
    async fn delete_account(&self, id: &AccountId) -> Result<(), AccountError>;

    /// Newest first, with the total count for pagination metadata.
    async fn list_accounts(&self, page: PageRequest) -> Result<AccountPage, AccountError>;

    /// Verify credentials and issue an access token.
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `AccountDeactivated` - Correct account, but inactive
    /// * `TokenGeneration` / `Database` - Internal failures
    async fn login(&self, email: &EmailAddress, password: &str)
        -> Result<LoginOutcome, AccountError>;

    /// Acknowledge a logout. No token is invalidated server-side.
    async fn logout(&self, id: &AccountId) -> Result<(), AccountError>;

    /// Round-trip to the store and report pool usage.
    async fn check_health(&self) -> Result<StoreStats, AccountError>;
}

/// Persistence operations for the account aggregate.
///
/// Unless stated otherwise, soft-deleted rows are invisible. Lookups return
/// `Ok(None)` for absence so callers can tell it apart from store failure.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Insert a new account.
    ///
    /// Uniqueness of email and username is enforced by the store itself.
    ///
    /// # Errors
    /// * `EmailTaken` / `UsernameTaken` - Unique constraint violated
    /// * `Database` - Store failure
    async fn create(&self, account: NewAccount) -> Result<Account, AccountError>;

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Like `find_by_id`, but also returns soft-deleted rows.
    async fn find_by_id_including_deleted(
        &self,
        id: &AccountId,
    ) -> Result<Option<Account>, AccountError>;

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError>;

    async fn find_by_username(&self, username: &Username)
        -> Result<Option<Account>, AccountError>;

    /// Replace every mutable field and bump `updated_at`.
    ///
    /// # Errors
    /// * `NotFound` - No live row with this id
    /// * `EmailTaken` / `UsernameTaken` - Unique constraint violated
    /// * `Database` - Store failure
    async fn update(&self, account: Account) -> Result<Account, AccountError>;

    /// Mark as deleted. Deleting an already-deleted row is a no-op.
    async fn soft_delete(&self, id: &AccountId) -> Result<(), AccountError>;

    /// Ordered by creation time, newest first.
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Account>, AccountError>;

    async fn count(&self) -> Result<i64, AccountError>;

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, AccountError>;

    async fn exists_by_username(&self, username: &Username) -> Result<bool, AccountError>;

    /// Stamp `last_login` with the current time.
    async fn update_last_login(&self, id: &AccountId) -> Result<(), AccountError>;

    /// Cheap query proving the store answers, plus a pool snapshot.
    async fn ping(&self) -> Result<StoreStats, AccountError>;
}
