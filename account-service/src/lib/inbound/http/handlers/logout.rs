use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

/// Stateless acknowledgement. The presented token stays valid until it
/// expires.
pub async fn logout(
    State(state): State<AppState>,
    identity: AuthenticatedAccount,
) -> Result<ApiSuccess<()>, ApiError> {
    state
        .account_service
        .logout(&identity.account_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::without_data(StatusCode::OK, "Logout successful"))
}
