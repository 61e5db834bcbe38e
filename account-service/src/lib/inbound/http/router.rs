use std::any::Any;
use std::backtrace::Backtrace;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Json;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::MakeRequestUuid;
use tower_http::request_id::PropagateRequestIdLayer;
use tower_http::request_id::SetRequestIdLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::OnResponse;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::admin_create_user::admin_create_user;
use super::handlers::auth_status::auth_status;
use super::handlers::delete_user::delete_user;
use super::handlers::get_user::get_user;
use super::handlers::health::health;
use super::handlers::health::liveness;
use super::handlers::health::readiness;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::profile::profile;
use super::handlers::refresh_token::refresh_token;
use super::handlers::register::register;
use super::handlers::update_user::update_user;
use super::handlers::ApiError;
use super::handlers::ApiResponseBody;
use super::middleware::optional_auth;
use super::middleware::require_admin;
use super::middleware::require_auth;
use crate::account::ports::AccountServicePort;
use crate::authentication::ports::AuthServicePort;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub auth_service: Arc<dyn AuthServicePort>,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    auth_service: Arc<dyn AuthServicePort>,
    request_timeout: Duration,
) -> Router {
    let state = AppState {
        account_service,
        auth_service,
    };

    let public_routes = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh_token));

    let optional_auth_routes = Router::new()
        .route("/auth/status", get(auth_status))
        .route_layer(middleware::from_fn_with_state(state.clone(), optional_auth));

    let protected_routes = Router::new()
        .route("/auth/logout", post(logout))
        .route("/auth/profile", get(profile))
        .route("/users", get(list_users))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Layers wrap outside-in: require_auth runs before require_admin.
    let admin_routes = Router::new()
        .route("/admin/users", post(admin_create_user))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let api_routes = Router::new()
        .merge(public_routes)
        .merge(optional_auth_routes)
        .merge(protected_routes)
        .merge(admin_routes);

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .route("/health/live", get(liveness));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            let request_id = request
                .headers()
                .get("x-request-id")
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default();

            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id,
            )
        })
        .on_request(())
        .on_response(LogResponse)
        .on_failure(());

    Router::new()
        .nest("/api/v1", api_routes)
        .merge(health_routes)
        .fallback(route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(trace_layer)
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(TimeoutLayer::new(request_timeout))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Completion event: 5xx at error, 4xx at warn, everything else at info.
#[derive(Debug, Clone, Copy)]
struct LogResponse;

impl<B> OnResponse<B> for LogResponse {
    fn on_response(self, response: &http::Response<B>, latency: Duration, _span: &Span) {
        let status = response.status();
        let latency_ms = latency.as_millis();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), latency_ms, "Request completed");
        } else if status.is_client_error() {
            tracing::warn!(status = status.as_u16(), latency_ms, "Request completed");
        } else {
            tracing::info!(status = status.as_u16(), latency_ms, "Request completed");
        }
    }
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(
        panic = %detail,
        backtrace = %Backtrace::force_capture(),
        "Request handler panicked"
    );

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponseBody::failure("Internal server error", None)),
    )
        .into_response()
}

async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}
