use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::models::StoreStats;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthData {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
    pub services: ServicesHealth,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServicesHealth {
    pub database: DatabaseHealth,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseHealth {
    pub status: &'static str,
    pub stats: PoolStats,
}

/// Pool usage as seen right after the health query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    pub open_connections: u32,
    pub idle_connections: usize,
    pub in_use: usize,
    pub max_connections: u32,
}

impl From<StoreStats> for PoolStats {
    fn from(stats: StoreStats) -> Self {
        Self {
            open_connections: stats.open_connections,
            idle_connections: stats.idle_connections,
            in_use: (stats.open_connections as usize).saturating_sub(stats.idle_connections),
            max_connections: stats.max_connections,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadinessData {
    pub ready: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LivenessData {
    pub alive: bool,
    pub timestamp: DateTime<Utc>,
}

pub async fn health(State(state): State<AppState>) -> Result<ApiSuccess<HealthData>, ApiError> {
    let stats = store_stats(&state, "Service is unhealthy").await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        "Service is healthy",
        HealthData {
            status: "healthy",
            version: env!("CARGO_PKG_VERSION"),
            timestamp: Utc::now(),
            services: ServicesHealth {
                database: DatabaseHealth {
                    status: "healthy",
                    stats: stats.into(),
                },
            },
        },
    ))
}

pub async fn readiness(
    State(state): State<AppState>,
) -> Result<ApiSuccess<ReadinessData>, ApiError> {
    store_stats(&state, "Service is not ready").await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        "Service is ready",
        ReadinessData {
            ready: true,
            timestamp: Utc::now(),
        },
    ))
}

/// Answers as long as the process can serve requests.
pub async fn liveness() -> ApiSuccess<LivenessData> {
    ApiSuccess::new(
        StatusCode::OK,
        "Service is alive",
        LivenessData {
            alive: true,
            timestamp: Utc::now(),
        },
    )
}

async fn store_stats(state: &AppState, unavailable: &str) -> Result<StoreStats, ApiError> {
    state.account_service.check_health().await.map_err(|e| {
        tracing::error!(error = %e, "Database health check failed");
        ApiError::ServiceUnavailable(unavailable.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_stats_in_use() {
        let stats = PoolStats::from(StoreStats {
            open_connections: 4,
            idle_connections: 3,
            max_connections: 10,
        });

        assert_eq!(stats.in_use, 1);
        assert_eq!(stats.max_connections, 10);
    }
}
