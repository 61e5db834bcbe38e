use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AccountPage;
use crate::account::models::CreateAccountCommand;
use crate::account::models::EmailAddress;
use crate::account::models::LoginOutcome;
use crate::account::models::NewAccount;
use crate::account::models::PageRequest;
use crate::account::models::PersonName;
use crate::account::models::StoreStats;
use crate::account::models::UpdateAccountCommand;
use crate::account::models::Username;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;

mock! {
    pub TestAccountRepository {}

    #[async_trait]
    impl AccountRepository for TestAccountRepository {
        async fn create(&self, account: NewAccount) -> Result<Account, AccountError>;
        async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;
        async fn find_by_id_including_deleted(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;
        async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError>;
        async fn find_by_username(&self, username: &Username) -> Result<Option<Account>, AccountError>;
        async fn update(&self, account: Account) -> Result<Account, AccountError>;
        async fn soft_delete(&self, id: &AccountId) -> Result<(), AccountError>;
        async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Account>, AccountError>;
        async fn count(&self) -> Result<i64, AccountError>;
        async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, AccountError>;
        async fn exists_by_username(&self, username: &Username) -> Result<bool, AccountError>;
        async fn update_last_login(&self, id: &AccountId) -> Result<(), AccountError>;
        async fn ping(&self) -> Result<StoreStats, AccountError>;
    }
}

mock! {
    pub TestAccountService {}

    #[async_trait]
    impl AccountServicePort for TestAccountService {
        async fn register(&self, command: CreateAccountCommand) -> Result<Account, AccountError>;
        async fn create_account(&self, command: CreateAccountCommand, is_admin: bool) -> Result<Account, AccountError>;
        async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError>;
        async fn update_account(&self, id: &AccountId, command: UpdateAccountCommand) -> Result<Account, AccountError>;
        async fn delete_account(&self, id: &AccountId) -> Result<(), AccountError>;
        async fn list_accounts(&self, page: PageRequest) -> Result<AccountPage, AccountError>;
        async fn login(&self, email: &EmailAddress, password: &str) -> Result<LoginOutcome, AccountError>;
        async fn logout(&self, id: &AccountId) -> Result<(), AccountError>;
        async fn check_health(&self) -> Result<StoreStats, AccountError>;
    }
}

/// Active, non-admin account with the given id and handle.
pub fn sample_account(id: i64, username: &str) -> Account {
    Account {
        id: AccountId::new(id).unwrap(),
        email: EmailAddress::new(format!("{}@example.com", username)).unwrap(),
        username: Username::new(username.to_string()).unwrap(),
        password_hash: "$argon2id$test_hash".to_string(),
        first_name: PersonName::new("Test".to_string()).unwrap(),
        last_name: PersonName::new("User".to_string()).unwrap(),
        is_active: true,
        is_admin: false,
        last_login: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
