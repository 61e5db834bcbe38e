use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::get_user::parse_account_id;
use super::AccountData;
use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::account::errors::AccountError;
use crate::account::models::EmailAddress;
use crate::account::models::PersonName;
use crate::account::models::UpdateAccountCommand;
use crate::account::models::Username;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

/// HTTP request body for a partial update (raw JSON)
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: Option<bool>,
    pub is_admin: Option<bool>,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateAccountCommand, AccountError> {
        Ok(UpdateAccountCommand {
            email: self.email.map(EmailAddress::new).transpose()?,
            username: self.username.map(Username::new).transpose()?,
            first_name: self.first_name.map(PersonName::new).transpose()?,
            last_name: self.last_name.map(PersonName::new).transpose()?,
            is_active: self.is_active,
            is_admin: self.is_admin,
        })
    }
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    identity: AuthenticatedAccount,
    ApiJson(body): ApiJson<UpdateUserRequest>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let id = parse_account_id(&id)?;

    if !identity.can_manage(&id) {
        return Err(ApiError::Forbidden(
            "You can only update your own profile".to_string(),
        ));
    }

    if body.is_admin.is_some() && !identity.is_admin {
        return Err(ApiError::Forbidden(
            "Admin access required to change admin status".to_string(),
        ));
    }

    let command = body.try_into_command()?;

    state
        .account_service
        .update_account(&id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, "User updated successfully", account.into()))
}
