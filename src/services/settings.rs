//! Settings service

use crate::{
    error::{AppError, AppResult},
    models::setting::{Setting, UpdateSetting},
    repository::Repository,
};

#[derive(Clone)]
pub struct SettingsService {
    repository: Repository,
}

impl SettingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Setting>> {
        self.repository.settings.list().await
    }

    /// Store a setting value, creating the key when needed
    pub async fn update(&self, key: &str, data: UpdateSetting) -> AppResult<Setting> {
        let key = key.trim();
        if key.is_empty() {
            return Err(AppError::Validation("Setting key is required".to_string()));
        }
        let setting = self.repository.settings.upsert(key, &data).await?;
        tracing::info!(key = %setting.setting_key, "Setting updated");
        Ok(setting)
    }
}
