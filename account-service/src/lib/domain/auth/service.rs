use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::account::ports::AccountRepository;
use crate::authentication::errors::AuthError;
use crate::authentication::ports::AuthServicePort;
use crate::config::JwtConfig;

/// Token service backed by the account store.
///
/// Every validation re-reads the account, so deactivation and deletion take
/// effect immediately, even for tokens whose signature is still valid.
pub struct AuthService<AR>
where
    AR: AccountRepository,
{
    authenticator: Authenticator,
    repository: Arc<AR>,
}

impl<AR> AuthService<AR>
where
    AR: AccountRepository,
{
    pub fn new(config: &JwtConfig, repository: Arc<AR>) -> Self {
        Self {
            authenticator: Authenticator::new(config.secret.as_bytes(), config.token_ttl()),
            repository,
        }
    }
}

#[async_trait]
impl<AR> AuthServicePort for AuthService<AR>
where
    AR: AccountRepository,
{
    fn issue_token(
        &self,
        id: &AccountId,
        email: &EmailAddress,
        is_admin: bool,
    ) -> Result<String, AuthError> {
        Ok(self
            .authenticator
            .issue_token(id.as_i64(), email.as_str(), is_admin)?)
    }

    async fn validate_token(&self, token: &str) -> Result<Account, AuthError> {
        let claims = self.authenticator.parse_token(token)?;
        let id = AccountId::new(claims.user_id).map_err(|_| AuthError::InvalidToken)?;

        let account = self
            .repository
            .find_by_id(&id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        if !account.is_active {
            return Err(AuthError::AccountInactive);
        }

        Ok(account)
    }

    fn refresh_token(&self, token: &str) -> Result<String, AuthError> {
        Ok(self.authenticator.refresh_token(token)?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::account::models::PersonName;
    use crate::account::models::Username;
    use crate::account::mocks::MockTestAccountRepository;

    const SECRET: &str = "auth-service-test-secret-at-least-32-bytes";

    fn jwt_config(expiration_hours: i64) -> JwtConfig {
        JwtConfig {
            secret: SECRET.to_string(),
            expiration_hours,
        }
    }

    fn account(id: i64, is_active: bool, is_admin: bool) -> Account {
        Account {
            id: AccountId::new(id).unwrap(),
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
            username: Username::new("alice".to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            first_name: PersonName::new("Alice".to_string()).unwrap(),
            last_name: PersonName::new("Liddell".to_string()).unwrap(),
            is_active,
            is_admin,
            last_login: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_validate_token_returns_live_account() {
        let mut repository = MockTestAccountRepository::new();
        let stored = account(7, true, true);
        let returned = stored.clone();
        repository
            .expect_find_by_id()
            .withf(|id| id.as_i64() == 7)
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let service = AuthService::new(&jwt_config(1), Arc::new(repository));
        let token = service
            .issue_token(&stored.id, &stored.email, stored.is_admin)
            .unwrap();

        let validated = service.validate_token(&token).await.unwrap();
        assert_eq!(validated.id, stored.id);
        assert!(validated.is_admin);
    }

    #[tokio::test]
    async fn test_validate_token_rejects_garbage_without_store_lookup() {
        let mut repository = MockTestAccountRepository::new();
        repository.expect_find_by_id().times(0);

        let service = AuthService::new(&jwt_config(1), Arc::new(repository));

        let result = service.validate_token("not.a.token").await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_validate_token_rejects_expired_token() {
        let mut repository = MockTestAccountRepository::new();
        repository.expect_find_by_id().times(0);

        let service = AuthService::new(&jwt_config(-1), Arc::new(repository));
        let stored = account(7, true, false);
        let token = service
            .issue_token(&stored.id, &stored.email, false)
            .unwrap();

        let result = service.validate_token(&token).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_validate_token_for_deleted_account() {
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(&jwt_config(1), Arc::new(repository));
        let stored = account(3, true, false);
        let token = service.issue_token(&stored.id, &stored.email, false).unwrap();

        let result = service.validate_token(&token).await;
        assert!(matches!(result, Err(AuthError::AccountNotFound)));
    }

    #[tokio::test]
    async fn test_validate_token_for_deactivated_account() {
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(account(3, false, false))));

        let service = AuthService::new(&jwt_config(1), Arc::new(repository));
        let stored = account(3, true, false);
        let token = service.issue_token(&stored.id, &stored.email, false).unwrap();

        let result = service.validate_token(&token).await;
        assert!(matches!(result, Err(AuthError::AccountInactive)));
    }

    #[tokio::test]
    async fn test_refresh_token_preserves_identity() {
        let repository = MockTestAccountRepository::new();
        let service = AuthService::new(&jwt_config(2), Arc::new(repository));
        let stored = account(11, true, true);

        let token = service.issue_token(&stored.id, &stored.email, true).unwrap();
        let refreshed = service.refresh_token(&token).unwrap();

        let authenticator = Authenticator::new(SECRET.as_bytes(), chrono::Duration::hours(2));
        let claims = authenticator.parse_token(&refreshed).unwrap();
        assert_eq!(claims.user_id, 11);
        assert_eq!(claims.email, "alice@example.com");
        assert!(claims.is_admin);
    }

    #[test]
    fn test_refresh_rejects_invalid_token() {
        let repository = MockTestAccountRepository::new();
        let service = AuthService::new(&jwt_config(2), Arc::new(repository));

        assert!(matches!(
            service.refresh_token("garbage"),
            Err(AuthError::InvalidToken)
        ));
    }
}
