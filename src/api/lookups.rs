//! Department and visit purpose endpoints

use axum::extract::State;

use crate::{api::extract::Json, error::AppResult, models::lookup::LookupEntry, AppState};

/// List active departments
#[utoipa::path(
    get,
    path = "/departments",
    tag = "reference",
    responses(
        (status = 200, description = "Active departments", body = Vec<LookupEntry>)
    )
)]
pub async fn list_departments(State(state): State<AppState>) -> AppResult<Json<Vec<LookupEntry>>> {
    Ok(Json(state.services.directory.departments().await?))
}

/// List active visit purposes
#[utoipa::path(
    get,
    path = "/purposes",
    tag = "reference",
    responses(
        (status = 200, description = "Active visit purposes", body = Vec<LookupEntry>)
    )
)]
pub async fn list_purposes(State(state): State<AppState>) -> AppResult<Json<Vec<LookupEntry>>> {
    Ok(Json(state.services.directory.purposes().await?))
}
