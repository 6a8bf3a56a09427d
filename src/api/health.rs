//! Health check endpoint

use axum::{extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{api::extract::Json, database::PoolStats, AppState};

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` or `error`
    pub status: String,
    /// Result of a live ping: `connected` or `disconnected`
    pub database: String,
    /// Connection flag maintained by the monitors
    pub connected: bool,
    /// Consecutive failed reconnects
    pub retries: u32,
    pub pool: PoolStats,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub version: String,
    /// Ping error, when the database is unreachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Liveness and pool statistics
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service and database are healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let ping = state.database.ping_connection().await;

    let (status, database, message) = match &ping {
        Ok(()) => (StatusCode::OK, "connected", None),
        Err(e) => (StatusCode::SERVICE_UNAVAILABLE, "disconnected", Some(e.to_string())),
    };

    let body = HealthResponse {
        status: if ping.is_ok() { "ok" } else { "error" }.to_string(),
        database: database.to_string(),
        connected: state.database.is_connected(),
        retries: state.database.retries(),
        pool: state.database.pool_stats().await,
        timestamp: Utc::now(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message,
    };

    (status, Json(body))
}
