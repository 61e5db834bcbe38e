use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::account::models::NewAccount;
use crate::account::models::PersonName;
use crate::account::models::StoreStats;
use crate::account::models::Username;
use crate::account::ports::AccountRepository;

const EMAIL_UNIQUE_INDEX: &str = "users_email_key";
const USERNAME_UNIQUE_INDEX: &str = "users_username_key";

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: i64,
    email: String,
    username: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    is_active: bool,
    is_admin: bool,
    last_login: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            id: AccountId::new(row.id)?,
            email: EmailAddress::new(row.email)?,
            username: Username::new(row.username)?,
            password_hash: row.password_hash,
            first_name: PersonName::new(row.first_name)?,
            last_name: PersonName::new(row.last_name)?,
            is_active: row.is_active,
            is_admin: row.is_admin,
            last_login: row.last_login,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Translate unique-index violations into the matching domain conflict.
fn map_write_error(err: sqlx::Error) -> AccountError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some(EMAIL_UNIQUE_INDEX) => return AccountError::EmailTaken,
                Some(USERNAME_UNIQUE_INDEX) => return AccountError::UsernameTaken,
                _ => {}
            }
        }
    }
    AccountError::Database(err.to_string())
}

fn into_account(row: Option<AccountRow>) -> Result<Option<Account>, AccountError> {
    row.map(Account::try_from).transpose()
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<Account, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO users (email, username, password_hash, first_name, last_name, is_active, is_admin)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, email, username, password_hash, first_name, last_name,
                      is_active, is_admin, last_login, created_at, updated_at
            "#,
        )
        .bind(account.email.as_str())
        .bind(account.username.as_str())
        .bind(&account.password_hash)
        .bind(account.first_name.as_str())
        .bind(account.last_name.as_str())
        .bind(account.is_active)
        .bind(account.is_admin)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, username, password_hash, first_name, last_name,
                   is_active, is_admin, last_login, created_at, updated_at
            FROM users
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        into_account(row)
    }

    async fn find_by_id_including_deleted(
        &self,
        id: &AccountId,
    ) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, username, password_hash, first_name, last_name,
                   is_active, is_admin, last_login, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        into_account(row)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, username, password_hash, first_name, last_name,
                   is_active, is_admin, last_login, created_at, updated_at
            FROM users
            WHERE email = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        into_account(row)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, username, password_hash, first_name, last_name,
                   is_active, is_admin, last_login, created_at, updated_at
            FROM users
            WHERE username = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        into_account(row)
    }

    async fn update(&self, account: Account) -> Result<Account, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            UPDATE users
            SET email = $2, username = $3, password_hash = $4, first_name = $5,
                last_name = $6, is_active = $7, is_admin = $8, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, email, username, password_hash, first_name, last_name,
                      is_active, is_admin, last_login, created_at, updated_at
            "#,
        )
        .bind(account.id.as_i64())
        .bind(account.email.as_str())
        .bind(account.username.as_str())
        .bind(&account.password_hash)
        .bind(account.first_name.as_str())
        .bind(account.last_name.as_str())
        .bind(account.is_active)
        .bind(account.is_admin)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        into_account(row)?.ok_or(AccountError::NotFound)
    }

    async fn soft_delete(&self, id: &AccountId) -> Result<(), AccountError> {
        sqlx::query(
            r#"
            UPDATE users
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.as_i64())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Account>, AccountError> {
        let rows = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, username, password_hash, first_name, last_name,
                   is_active, is_admin, last_login, created_at, updated_at
            FROM users
            WHERE deleted_at IS NULL
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Account::try_from).collect()
    }

    async fn count(&self) -> Result<i64, AccountError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE deleted_at IS NULL")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, AccountError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM users WHERE email = $1 AND deleted_at IS NULL)",
        )
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_username(&self, username: &Username) -> Result<bool, AccountError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM users WHERE username = $1 AND deleted_at IS NULL)",
        )
        .bind(username.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update_last_login(&self, id: &AccountId) -> Result<(), AccountError> {
        sqlx::query("UPDATE users SET last_login = NOW() WHERE id = $1 AND deleted_at IS NULL")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn ping(&self) -> Result<StoreStats, AccountError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;

        Ok(StoreStats {
            open_connections: self.pool.size(),
            idle_connections: self.pool.num_idle(),
            max_connections: self.pool.options().get_max_connections(),
        })
    }
}
