use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedAccount;

/// Reports who the caller is, if anyone. Never rejects.
pub async fn auth_status(identity: Option<AuthenticatedAccount>) -> ApiSuccess<AuthStatusData> {
    let data = AuthStatusData {
        authenticated: identity.is_some(),
        user: identity.map(|identity| IdentityData {
            id: identity.account_id.as_i64(),
            email: identity.email,
            is_admin: identity.is_admin,
        }),
    };

    ApiSuccess::new(StatusCode::OK, "Authentication status retrieved", data)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthStatusData {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<IdentityData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityData {
    pub id: i64,
    pub email: String,
    pub is_admin: bool,
}
