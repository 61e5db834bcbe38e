use std::sync::Arc;

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
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;
use crate::authentication::errors::AuthError;
use crate::authentication::ports::AuthServicePort;

/// Domain service implementation for account operations.
///
/// Concrete implementation of AccountServicePort with dependency injection.
pub struct AccountService<AR, AS>
where
    AR: AccountRepository,
    AS: AuthServicePort,
{
    repository: Arc<AR>,
    auth_service: Arc<AS>,
    password_hasher: auth::PasswordHasher,
}

impl<AR, AS> AccountService<AR, AS>
where
    AR: AccountRepository,
    AS: AuthServicePort,
{
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `auth_service` - Token issuance for successful logins
    pub fn new(repository: Arc<AR>, auth_service: Arc<AS>) -> Self {
        Self {
            repository,
            auth_service,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    /// Friendly conflict check before insert. The store's unique indexes
    /// still decide races between concurrent registrations.
    async fn ensure_available(&self, command: &CreateAccountCommand) -> Result<(), AccountError> {
        if self.repository.exists_by_email(&command.email).await? {
            return Err(AccountError::EmailTaken);
        }
        if self.repository.exists_by_username(&command.username).await? {
            return Err(AccountError::UsernameTaken);
        }
        Ok(())
    }

    async fn insert(
        &self,
        command: CreateAccountCommand,
        is_admin: bool,
    ) -> Result<Account, AccountError> {
        self.ensure_available(&command).await?;

        let hasher = self.password_hasher.clone();
        let plaintext = command.password.expose().to_string();
        let password_hash = run_blocking(move || hasher.hash(&plaintext)).await?;

        let account = self
            .repository
            .create(NewAccount {
                email: command.email,
                username: command.username,
                password_hash,
                first_name: command.first_name,
                last_name: command.last_name,
                is_active: true,
                is_admin,
            })
            .await?;

        tracing::info!(
            account_id = %account.id,
            username = %account.username,
            is_admin = account.is_admin,
            "Account created"
        );

        Ok(account)
    }
}

/// Argon2 is deliberately slow; keep it off the async workers.
async fn run_blocking<T, F>(work: F) -> Result<T, AccountError>
where
    F: FnOnce() -> Result<T, auth::PasswordError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AccountError::Credential(auth::PasswordError::HashingFailed(e.to_string())))?
        .map_err(AccountError::from)
}

#[async_trait]
impl<AR, AS> AccountServicePort for AccountService<AR, AS>
where
    AR: AccountRepository,
    AS: AuthServicePort,
{
    async fn register(&self, command: CreateAccountCommand) -> Result<Account, AccountError> {
        self.insert(command, false).await
    }

    async fn create_account(
        &self,
        command: CreateAccountCommand,
        is_admin: bool,
    ) -> Result<Account, AccountError> {
        self.insert(command, is_admin).await
    }

    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound)
    }

    async fn update_account(
        &self,
        id: &AccountId,
        command: UpdateAccountCommand,
    ) -> Result<Account, AccountError> {
        let mut account = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound)?;

        if let Some(email) = command.email {
            if email != account.email {
                if self.repository.exists_by_email(&email).await? {
                    return Err(AccountError::EmailTaken);
                }
                account.email = email;
            }
        }

        if let Some(username) = command.username {
            if username != account.username {
                if self.repository.exists_by_username(&username).await? {
                    return Err(AccountError::UsernameTaken);
                }
                account.username = username;
            }
        }

        if let Some(first_name) = command.first_name {
            account.first_name = first_name;
        }

        if let Some(last_name) = command.last_name {
            account.last_name = last_name;
        }

        if let Some(is_active) = command.is_active {
            account.is_active = is_active;
        }

        if let Some(is_admin) = command.is_admin {
            account.is_admin = is_admin;
        }

        let updated = self.repository.update(account).await?;
        tracing::info!(account_id = %updated.id, "Account updated");

        Ok(updated)
    }

    async fn delete_account(&self, id: &AccountId) -> Result<(), AccountError> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(AccountError::NotFound);
        }

        self.repository.soft_delete(id).await?;
        tracing::info!(account_id = %id, "Account soft-deleted");

        Ok(())
    }

    async fn list_accounts(&self, page: PageRequest) -> Result<AccountPage, AccountError> {
        let accounts = self
            .repository
            .list(i64::from(page.limit()), page.offset())
            .await?;
        let total = self.repository.count().await?;

        Ok(AccountPage {
            accounts,
            total,
            page: page.page(),
            limit: page.limit(),
        })
    }

    async fn login(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<LoginOutcome, AccountError> {
        let account = match self.repository.find_by_email(email).await? {
            Some(account) => account,
            None => {
                tracing::debug!("Login attempt for unknown email");
                return Err(AccountError::InvalidCredentials);
            }
        };

        if !account.is_active {
            tracing::warn!(account_id = %account.id, "Login attempt on deactivated account");
            return Err(AccountError::AccountDeactivated);
        }

        let hasher = self.password_hasher.clone();
        let plaintext = password.to_string();
        let digest = account.password_hash.clone();
        if !run_blocking(move || hasher.verify(&plaintext, &digest)).await? {
            tracing::warn!(account_id = %account.id, "Login attempt with wrong password");
            return Err(AccountError::InvalidCredentials);
        }

        let access_token = self
            .auth_service
            .issue_token(&account.id, &account.email, account.is_admin)
            .map_err(|e| match e {
                AuthError::TokenGeneration(reason) => AccountError::TokenGeneration(reason),
                other => AccountError::TokenGeneration(other.to_string()),
            })?;

        if let Err(e) = self.repository.update_last_login(&account.id).await {
            tracing::warn!(
                account_id = %account.id,
                error = %e,
                "Failed to record last login"
            );
        }

        tracing::info!(account_id = %account.id, "Login successful");

        Ok(LoginOutcome {
            access_token,
            account,
        })
    }

    async fn logout(&self, id: &AccountId) -> Result<(), AccountError> {
        tracing::info!(account_id = %id, "Logout acknowledged");
        Ok(())
    }

    async fn check_health(&self) -> Result<StoreStats, AccountError> {
        self.repository.ping().await
    }
}
