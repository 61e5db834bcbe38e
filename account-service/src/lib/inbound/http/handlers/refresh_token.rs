use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::authentication::errors::AuthError;
use crate::authentication::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Reissues a still-valid token. No revocation list is consulted.
pub async fn refresh_token(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RefreshTokenRequest>,
) -> Result<ApiSuccess<RefreshTokenResponseData>, ApiError> {
    if body.token.trim().is_empty() {
        return Err(ApiError::Validation("Token is required".to_string()));
    }

    let access_token = state
        .auth_service
        .refresh_token(&body.token)
        .map_err(|e| match e {
            AuthError::TokenGeneration(detail) | AuthError::Database(detail) => {
                ApiError::InternalServerError(detail)
            }
            _ => ApiError::Unauthorized("Invalid token".to_string()),
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        "Token refreshed successfully",
        RefreshTokenResponseData { access_token },
    ))
}

#[derive(Deserialize)]
pub struct RefreshTokenRequest {
    token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshTokenResponseData {
    pub access_token: String,
}
