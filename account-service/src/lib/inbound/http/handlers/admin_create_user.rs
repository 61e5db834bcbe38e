use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::register::CreateUserRequest;
use super::AccountData;
use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

/// Admin-only creation. Unlike self-registration it may grant admin.
pub async fn admin_create_user(
    State(state): State<AppState>,
    admin: AuthenticatedAccount,
    ApiJson(body): ApiJson<AdminCreateUserRequest>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let is_admin = body.is_admin.unwrap_or(false);
    let command = body.account.try_into_command()?;

    let account = state
        .account_service
        .create_account(command, is_admin)
        .await?;

    tracing::info!(
        created_by = %admin.account_id,
        account_id = %account.id,
        is_admin,
        "Account created by admin"
    );

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        "User created successfully",
        (&account).into(),
    ))
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminCreateUserRequest {
    #[serde(flatten)]
    account: CreateUserRequest,
    is_admin: Option<bool>,
}
