use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountPage;

pub mod admin_create_user;
pub mod auth_status;
pub mod delete_user;
pub mod get_user;
pub mod health;
pub mod list_users;
pub mod login;
pub mod logout;
pub mod profile;
pub mod refresh_token;
pub mod register;
pub mod update_user;

/// Standard success envelope: `{success: true, message, data?}`.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<ApiResponseBody<T>>);

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, message: &str, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::success(message, Some(data))))
    }
}

impl ApiSuccess<()> {
    pub fn without_data(status: StatusCode, message: &str) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::success(message, None)))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize> {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponseBody<T> {
    fn success(message: &str, data: Option<T>) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data,
            error: None,
        }
    }
}

impl ApiResponseBody<()> {
    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Well-formed JSON that breaks a field rule.
    Validation(String),
    /// Body that is not valid JSON for the expected shape.
    InvalidJson(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    ServiceUnavailable(String),
    /// Detail is logged, never returned.
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(detail) => (
                StatusCode::BAD_REQUEST,
                ApiResponseBody::failure("Validation failed", Some(detail)),
            ),
            ApiError::InvalidJson(detail) => (
                StatusCode::BAD_REQUEST,
                ApiResponseBody::failure("Invalid JSON", Some(detail)),
            ),
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiResponseBody::failure(msg, None))
            }
            ApiError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, ApiResponseBody::failure(msg, None))
            }
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, ApiResponseBody::failure(msg, None)),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiResponseBody::failure(msg, None)),
            ApiError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiResponseBody::failure(msg, None),
            ),
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponseBody::failure("Internal server error", None),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        if err.is_validation() {
            return ApiError::Validation(err.to_string());
        }

        match err {
            AccountError::NotFound => ApiError::NotFound(err.to_string()),
            AccountError::EmailTaken | AccountError::UsernameTaken => {
                ApiError::BadRequest(err.to_string())
            }
            AccountError::InvalidCredentials | AccountError::AccountDeactivated => {
                ApiError::Unauthorized(err.to_string())
            }
            _ => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidJson(rejection.body_text())
    }
}

/// `Json` extractor whose rejection uses the standard error envelope.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}

/// Outward account representation. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountData {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub is_admin: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Account> for AccountData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.as_i64(),
            email: account.email.as_str().to_string(),
            username: account.username.as_str().to_string(),
            first_name: account.first_name.as_str().to_string(),
            last_name: account.last_name.as_str().to_string(),
            is_active: account.is_active,
            is_admin: account.is_admin,
            last_login: account.last_login,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginatedData<T: Serialize> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: i64,
}

impl From<&AccountPage> for PaginatedData<AccountData> {
    fn from(page: &AccountPage) -> Self {
        Self {
            data: page.accounts.iter().map(AccountData::from).collect(),
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages(),
        }
    }
}
