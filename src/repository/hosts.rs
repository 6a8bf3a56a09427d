//! Hosts repository

use std::sync::Arc;

use crate::{
    database::Database,
    error::AppResult,
    models::host::{CreateHost, Host},
};

#[derive(Clone)]
pub struct HostsRepository {
    db: Arc<Database>,
}

impl HostsRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// List active hosts by name
    pub async fn list_active(&self) -> AppResult<Vec<Host>> {
        let rows = self
            .db
            .safe_query(|pool| async move {
                sqlx::query_as::<_, Host>("SELECT * FROM hosts WHERE is_active = TRUE ORDER BY name")
                    .fetch_all(&pool)
                    .await
            })
            .await?;
        Ok(rows)
    }

    /// Create a host
    pub async fn create(&self, data: &CreateHost) -> AppResult<Host> {
        let row = self
            .db
            .safe_insert(move |pool| async move {
                sqlx::query_as::<_, Host>(
                    r#"
                    INSERT INTO hosts (name, email, phone, department, designation)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING *
                    "#,
                )
                .bind(&data.name)
                .bind(&data.email)
                .bind(&data.phone)
                .bind(&data.department)
                .bind(&data.designation)
                .fetch_one(&pool)
                .await
            })
            .await?;
        Ok(row)
    }
}
