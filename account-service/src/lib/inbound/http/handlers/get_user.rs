use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::account::models::AccountId;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let id = parse_account_id(&id)?;

    state
        .account_service
        .get_account(&id)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, "User retrieved successfully", account.into()))
}

pub(super) fn parse_account_id(raw: &str) -> Result<AccountId, ApiError> {
    AccountId::from_string(raw).map_err(|_| ApiError::BadRequest("Invalid user ID".to_string()))
}
