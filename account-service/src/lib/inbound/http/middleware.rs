use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::authentication::errors::AuthError;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Caller identity attached to the request by the auth middleware.
///
/// Handlers take it as an extractor; a missing identity rejects with 401.
/// `Option<AuthenticatedAccount>` never rejects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub account_id: AccountId,
    pub email: String,
    pub is_admin: bool,
}

impl AuthenticatedAccount {
    /// Self or admin.
    pub fn can_manage(&self, target: &AccountId) -> bool {
        self.is_admin || self.account_id == *target
    }
}

impl From<&Account> for AuthenticatedAccount {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.id,
            email: account.email.as_str().to_string(),
            is_admin: account.is_admin,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedAccount
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedAccount>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("User not authenticated".to_string()))
    }
}

/// Rejects the request unless it carries a valid bearer token for a live,
/// active account.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = req.uri().path().to_string();

    let token = bearer_token(req.headers())
        .map_err(|e| {
            tracing::warn!(path = %path, reason = ?e, "Rejected request without usable credentials");
            e
        })?
        .to_string();

    let account = state
        .auth_service
        .validate_token(&token)
        .await
        .map_err(|e| match e {
            AuthError::Database(detail) => ApiError::InternalServerError(detail),
            other => {
                tracing::warn!(path = %path, reason = %other, "Invalid token");
                ApiError::Unauthorized("Invalid token".to_string())
            }
        })?;

    req.extensions_mut()
        .insert(AuthenticatedAccount::from(&account));

    Ok(next.run(req).await)
}

/// Attaches identity when a valid token is present, otherwise lets the
/// request through anonymously.
pub async fn optional_auth(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let token = bearer_token(req.headers()).ok().map(str::to_string);

    if let Some(token) = token {
        match state.auth_service.validate_token(&token).await {
            Ok(account) => {
                req.extensions_mut()
                    .insert(AuthenticatedAccount::from(&account));
            }
            Err(e) => {
                tracing::debug!(reason = %e, "Ignoring invalid optional token");
            }
        }
    }

    next.run(req).await
}

/// Must run after [`require_auth`].
pub async fn require_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    let is_admin = req
        .extensions()
        .get::<AuthenticatedAccount>()
        .map(|identity| identity.is_admin)
        .unwrap_or(false);

    if !is_admin {
        let account_id = req
            .extensions()
            .get::<AuthenticatedAccount>()
            .map(|identity| identity.account_id.as_i64());
        tracing::warn!(
            account_id = ?account_id,
            path = %req.uri().path(),
            "Admin access required"
        );
        return Err(ApiError::Forbidden("Admin access required".to_string()));
    }

    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Authorization header required".to_string()))?;

    let value = header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid authorization header format".to_string()))?;

    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or_else(|| ApiError::Unauthorized("Invalid authorization header format".to_string()))?;

    // Whitespace-only tokens go on to validation and fail there.
    if token.is_empty() {
        return Err(ApiError::Unauthorized("Token required".to_string()));
    }

    Ok(token)
}
