//! Departments and visit purposes repository

use std::sync::Arc;

use crate::{
    database::Database,
    error::AppResult,
    models::lookup::{LookupEntry, LookupTable},
};

#[derive(Clone)]
pub struct LookupsRepository {
    db: Arc<Database>,
}

impl LookupsRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Active entries of a lookup table, by name
    pub async fn list_active(&self, table: LookupTable) -> AppResult<Vec<LookupEntry>> {
        let query = format!(
            "SELECT id, name, description, is_active, created_at FROM {} WHERE is_active = TRUE ORDER BY name",
            table.table_name()
        );
        let query = query.as_str();

        let rows = self
            .db
            .safe_query(move |pool| async move {
                sqlx::query_as::<_, LookupEntry>(query).fetch_all(&pool).await
            })
            .await?;
        Ok(rows)
    }
}
