use async_trait::async_trait;
use mockall::mock;

use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::authentication::errors::AuthError;
use crate::authentication::ports::AuthServicePort;

mock! {
    pub TestAuthService {}

    #[async_trait]
    impl AuthServicePort for TestAuthService {
        fn issue_token(&self, id: &AccountId, email: &EmailAddress, is_admin: bool) -> Result<String, AuthError>;
        async fn validate_token(&self, token: &str) -> Result<Account, AuthError>;
        fn refresh_token(&self, token: &str) -> Result<String, AuthError>;
    }
}
