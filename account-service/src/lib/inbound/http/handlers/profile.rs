use axum::extract::State;
use axum::http::StatusCode;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn profile(
    State(state): State<AppState>,
    identity: AuthenticatedAccount,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    state
        .account_service
        .get_account(&identity.account_id)
        .await
        .map_err(ApiError::from)
        .map(|ref account| {
            ApiSuccess::new(StatusCode::OK, "Profile retrieved successfully", account.into())
        })
}
