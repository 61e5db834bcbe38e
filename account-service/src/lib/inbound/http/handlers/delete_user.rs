use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::get_user::parse_account_id;
use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::AccountError;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    identity: AuthenticatedAccount,
) -> Result<ApiSuccess<()>, ApiError> {
    let id = parse_account_id(&id)?;

    if !identity.can_manage(&id) {
        return Err(ApiError::Forbidden(
            "You can only delete your own profile".to_string(),
        ));
    }

    state
        .account_service
        .delete_account(&id)
        .await
        .map_err(|e| match e {
            AccountError::Database(detail) => {
                tracing::error!(account_id = %id, error = %detail, "Failed to delete user");
                ApiError::BadRequest("Failed to delete user".to_string())
            }
            other => ApiError::from(other),
        })
        .map(|_| ApiSuccess::without_data(StatusCode::OK, "User deleted successfully"))
}
