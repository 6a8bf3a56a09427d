//! Settings endpoints

use axum::extract::State;

use crate::{
    api::extract::{Json, Path},
    error::AppResult,
    models::setting::{Setting, UpdateSetting},
    AppState,
};

/// List all settings
#[utoipa::path(
    get,
    path = "/settings",
    tag = "settings",
    responses(
        (status = 200, description = "Settings", body = Vec<Setting>)
    )
)]
pub async fn list_settings(State(state): State<AppState>) -> AppResult<Json<Vec<Setting>>> {
    Ok(Json(state.services.settings.list().await?))
}

/// Create or update a setting
#[utoipa::path(
    put,
    path = "/settings/{key}",
    tag = "settings",
    params(("key" = String, Path, description = "Setting key")),
    request_body = UpdateSetting,
    responses(
        (status = 200, description = "Stored setting", body = Setting)
    )
)]
pub async fn update_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(data): Json<UpdateSetting>,
) -> AppResult<Json<Setting>> {
    Ok(Json(state.services.settings.update(&key, data).await?))
}
