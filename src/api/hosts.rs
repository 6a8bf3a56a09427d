//! Host endpoints

use axum::{extract::State, http::StatusCode};

use crate::{
    api::extract::Json,
    error::AppResult,
    models::host::{CreateHost, Host},
    AppState,
};

/// List active hosts
#[utoipa::path(
    get,
    path = "/hosts",
    tag = "hosts",
    responses(
        (status = 200, description = "Active hosts", body = Vec<Host>)
    )
)]
pub async fn list_hosts(State(state): State<AppState>) -> AppResult<Json<Vec<Host>>> {
    let hosts = state.services.directory.hosts().await?;
    Ok(Json(hosts))
}

/// Create a host
#[utoipa::path(
    post,
    path = "/hosts",
    tag = "hosts",
    request_body = CreateHost,
    responses(
        (status = 201, description = "Host created", body = Host),
        (status = 400, description = "Missing or invalid field", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_host(
    State(state): State<AppState>,
    Json(data): Json<CreateHost>,
) -> AppResult<(StatusCode, Json<Host>)> {
    let host = state.services.directory.create_host(data).await?;
    Ok((StatusCode::CREATED, Json(host)))
}
