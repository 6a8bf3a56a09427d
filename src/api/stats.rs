//! Statistics endpoints

use axum::extract::State;

use crate::{
    api::extract::{Json, Query},
    error::AppResult,
    models::statistics::{DashboardStats, StatisticsQuery, VisitorStatistics},
    AppState,
};

/// Dashboard counters
#[utoipa::path(
    get,
    path = "/statistics/dashboard",
    tag = "statistics",
    responses(
        (status = 200, description = "Dashboard counters", body = DashboardStats)
    )
)]
pub async fn dashboard(State(state): State<AppState>) -> AppResult<Json<DashboardStats>> {
    Ok(Json(state.services.stats.dashboard().await?))
}

/// Daily visitor aggregates for a date range
#[utoipa::path(
    get,
    path = "/statistics/visitors",
    tag = "statistics",
    params(StatisticsQuery),
    responses(
        (status = 200, description = "Daily aggregates", body = Vec<VisitorStatistics>),
        (status = 400, description = "Invalid date range", body = crate::error::ErrorResponse)
    )
)]
pub async fn visitor_statistics(
    State(state): State<AppState>,
    Query(query): Query<StatisticsQuery>,
) -> AppResult<Json<Vec<VisitorStatistics>>> {
    let rows = state
        .services
        .stats
        .daily(query.start_date, query.end_date)
        .await?;
    Ok(Json(rows))
}
