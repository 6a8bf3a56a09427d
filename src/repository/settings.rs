//! Settings repository

use std::sync::Arc;

use crate::{
    database::Database,
    error::AppResult,
    models::setting::{Setting, UpdateSetting},
};

#[derive(Clone)]
pub struct SettingsRepository {
    db: Arc<Database>,
}

impl SettingsRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> AppResult<Vec<Setting>> {
        let rows = self
            .db
            .safe_query(|pool| async move {
                sqlx::query_as::<_, Setting>("SELECT * FROM settings ORDER BY setting_key")
                    .fetch_all(&pool)
                    .await
            })
            .await?;
        Ok(rows)
    }

    /// Insert or update a setting by key
    pub async fn upsert(&self, key: &str, data: &UpdateSetting) -> AppResult<Setting> {
        let row = self
            .db
            .safe_insert(move |pool| async move {
                sqlx::query_as::<_, Setting>(
                    r#"
                    INSERT INTO settings (setting_key, setting_value, description, updated_at)
                    VALUES ($1, $2, $3, NOW())
                    ON CONFLICT (setting_key) DO UPDATE SET
                        setting_value = EXCLUDED.setting_value,
                        description = COALESCE(EXCLUDED.description, settings.description),
                        updated_at = NOW()
                    RETURNING *
                    "#,
                )
                .bind(key)
                .bind(&data.value)
                .bind(&data.description)
                .fetch_one(&pool)
                .await
            })
            .await?;
        Ok(row)
    }
}
