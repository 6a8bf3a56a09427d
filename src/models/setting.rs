//! Key/value application settings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Setting record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Setting {
    pub id: i32,
    pub setting_key: String,
    pub setting_value: Option<String>,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Update (or create) a setting
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSetting {
    pub value: Option<String>,
    pub description: Option<String>,
}
