use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use super::PaginatedData;
use crate::account::models::PageRequest;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<ApiSuccess<PaginatedData<AccountData>>, ApiError> {
    state
        .account_service
        .list_accounts(query.page_request())
        .await
        .map_err(ApiError::from)
        .map(|ref page| ApiSuccess::new(StatusCode::OK, "Users retrieved successfully", page.into()))
}

/// Raw query values. Anything that does not parse falls back to the default.
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    page: Option<String>,
    limit: Option<String>,
}

impl ListUsersQuery {
    fn page_request(&self) -> PageRequest {
        let parse = |value: &Option<String>| value.as_deref().and_then(|v| v.parse::<i64>().ok());
        PageRequest::new(parse(&self.page), parse(&self.limit))
    }
}
