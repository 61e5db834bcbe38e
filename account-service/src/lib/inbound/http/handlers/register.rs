use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::AccountData;
use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::account::errors::AccountError;
use crate::account::models::CreateAccountCommand;
use crate::account::models::EmailAddress;
use crate::account::models::Password;
use crate::account::models::PersonName;
use crate::account::models::Username;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateUserRequest>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    state
        .account_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref account| {
            ApiSuccess::new(StatusCode::CREATED, "User created successfully", account.into())
        })
}

/// HTTP request body for creating an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    email: String,
    username: String,
    password: String,
    first_name: String,
    last_name: String,
}

impl CreateUserRequest {
    pub(super) fn try_into_command(self) -> Result<CreateAccountCommand, AccountError> {
        Ok(CreateAccountCommand {
            email: EmailAddress::new(self.email)?,
            username: Username::new(self.username)?,
            password: Password::new(self.password)?,
            first_name: PersonName::new(self.first_name)?,
            last_name: PersonName::new(self.last_name)?,
        })
    }
}
