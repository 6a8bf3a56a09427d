//! Visitor endpoints

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};
use chrono::Utc;

use crate::{
    api::extract::{Json, Path, Query},
    error::AppResult,
    models::visitor::{CheckInVisitor, Visitor, VisitorQuery},
    services::export::export_filename,
    AppState,
};

/// List visitors, most recent first
#[utoipa::path(
    get,
    path = "/visitors",
    tag = "visitors",
    params(VisitorQuery),
    responses(
        (status = 200, description = "Visitors list", body = Vec<Visitor>),
        (status = 503, description = "Database unavailable", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_visitors(
    State(state): State<AppState>,
    Query(query): Query<VisitorQuery>,
) -> AppResult<Json<Vec<Visitor>>> {
    let visitors = state.services.visitors.list(&query).await?;
    Ok(Json(visitors))
}

/// Get a visitor by ID
#[utoipa::path(
    get,
    path = "/visitors/{id}",
    tag = "visitors",
    params(("id" = i32, Path, description = "Visitor ID")),
    responses(
        (status = 200, description = "Visitor", body = Visitor),
        (status = 404, description = "Visitor not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_visitor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Visitor>> {
    let visitor = state.services.visitors.get(id).await?;
    Ok(Json(visitor))
}

/// Check a visitor in
#[utoipa::path(
    post,
    path = "/visitors/checkin",
    tag = "visitors",
    request_body = CheckInVisitor,
    responses(
        (status = 201, description = "Visitor checked in", body = Visitor),
        (status = 400, description = "Missing or invalid field", body = crate::error::ErrorResponse)
    )
)]
pub async fn check_in(
    State(state): State<AppState>,
    Json(data): Json<CheckInVisitor>,
) -> AppResult<(StatusCode, Json<Visitor>)> {
    let visitor = state.services.visitors.check_in(data).await?;
    Ok((StatusCode::CREATED, Json(visitor)))
}

/// Check a visitor out
#[utoipa::path(
    put,
    path = "/visitors/{id}/checkout",
    tag = "visitors",
    params(("id" = i32, Path, description = "Visitor ID")),
    responses(
        (status = 200, description = "Visitor checked out", body = Visitor),
        (status = 404, description = "Visitor not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn check_out(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Visitor>> {
    let visitor = state.services.visitors.check_out(id).await?;
    Ok(Json(visitor))
}

/// Download visitors as CSV
#[utoipa::path(
    get,
    path = "/visitors/export/csv",
    tag = "visitors",
    params(VisitorQuery),
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv", body = String)
    )
)]
pub async fn export_csv(
    State(state): State<AppState>,
    Query(query): Query<VisitorQuery>,
) -> AppResult<impl IntoResponse> {
    let csv = state.services.visitors.export_csv(&query).await?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_filename(Utc::now().date_naive())
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}
