//! `GET /health`: liveness plus a round-trip to the backing store.

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::RepositoryProvider;

#[derive(Clone)]
pub struct HealthState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub started_at: Arc<Instant>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Degraded,
    Error,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub store: StoreHealth,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreHealth {
    pub status: HealthStatus,
    /// Ping round-trip, absent when the store is unreachable
    pub latency_ms: Option<u64>,
}

async fn probe_store(repos: &dyn RepositoryProvider) -> StoreHealth {
    let start = Instant::now();
    match repos.ping().await {
        Ok(()) => StoreHealth {
            status: HealthStatus::Ok,
            latency_ms: Some(u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)),
        },
        Err(e) => {
            warn!(error = %e, "Health check: store unreachable");
            StoreHealth {
                status: HealthStatus::Error,
                latency_ms: None,
            }
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service and store are reachable", body = HealthResponse),
        (status = 503, description = "Store unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let store = probe_store(state.repos.as_ref()).await;
    let (status, code) = match store.status {
        HealthStatus::Ok => (HealthStatus::Ok, StatusCode::OK),
        _ => (HealthStatus::Degraded, StatusCode::SERVICE_UNAVAILABLE),
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            uptime_seconds: state.started_at.elapsed().as_secs(),
            store,
        }),
    )
}
