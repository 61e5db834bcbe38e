use std::sync::Arc;

use account_service::account::errors::AccountError;
use account_service::account::models::CreateAccountCommand;
use account_service::account::models::EmailAddress;
use account_service::account::models::Password;
use account_service::account::models::PersonName;
use account_service::account::models::Username;
use account_service::account::ports::AccountServicePort;
use account_service::account::service::AccountService;
use account_service::authentication::service::AuthService;
use account_service::config::Config;
use account_service::repositories::PostgresAccountRepository;
use anyhow::Context;
use config::ConfigError;
use config::Environment;
use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Admin account to create, read from `SEED__*` environment variables.
#[derive(Deserialize)]
struct SeedAdmin {
    email: String,
    username: String,
    password: String,
    first_name: String,
    last_name: String,
}

impl SeedAdmin {
    fn load() -> Result<Self, ConfigError> {
        config::Config::builder()
            .add_source(Environment::with_prefix("SEED").separator("__"))
            .build()?
            .try_deserialize()
    }

    fn into_command(self) -> Result<CreateAccountCommand, AccountError> {
        Ok(CreateAccountCommand {
            email: EmailAddress::new(self.email)?,
            username: Username::new(self.username)?,
            password: Password::new(self.password)?,
            first_name: PersonName::new(self.first_name)?,
            last_name: PersonName::new(self.last_name)?,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seed_admin=info,account_service=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let command = SeedAdmin::load()
        .context(
            "SEED__EMAIL, SEED__USERNAME, SEED__PASSWORD, SEED__FIRST_NAME and SEED__LAST_NAME must be set",
        )?
        .into_command()?;

    let config = Config::load()?;

    let pg_pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations").run(&pg_pool).await?;

    let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool.clone()));
    let auth_service = Arc::new(AuthService::new(&config.jwt, Arc::clone(&account_repository)));
    let account_service = AccountService::new(account_repository, auth_service);

    let email = command.email.clone();
    let username = command.username.clone();
    let account = match account_service.create_account(command, true).await {
        Ok(account) => account,
        Err(AccountError::EmailTaken) => {
            anyhow::bail!("User with email {} already exists", email)
        }
        Err(AccountError::UsernameTaken) => {
            anyhow::bail!("Username {} is already taken", username)
        }
        Err(e) => return Err(e).context("Failed to create admin user"),
    };

    tracing::info!(
        id = account.id.as_i64(),
        email = %account.email,
        username = %account.username,
        is_admin = account.is_admin,
        "Admin user created"
    );

    pg_pool.close().await;

    Ok(())
}
