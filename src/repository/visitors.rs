//! Visitors repository

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use crate::{
    database::Database,
    error::{AppError, AppResult},
    models::{
        statistics::day_start,
        visitor::{CheckInVisitor, Visitor, VisitorQuery, VisitorStatus},
    },
};

/// Resolved filters for visitor listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisitorFilter {
    /// check_in_time >= from
    pub from: Option<DateTime<Utc>>,
    /// check_in_time < until
    pub until: Option<DateTime<Utc>>,
    pub status: Option<VisitorStatus>,
}

impl From<&VisitorQuery> for VisitorFilter {
    fn from(query: &VisitorQuery) -> Self {
        Self {
            from: query.start_date.map(day_start),
            until: query.end_date.map(|d| day_start(d) + Duration::days(1)),
            status: query.status,
        }
    }
}

impl VisitorFilter {
    /// WHERE clause with numbered placeholders, in bind order from, until, status
    pub fn where_clause(&self) -> String {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if self.from.is_some() {
            conditions.push(format!("check_in_time >= ${}", idx));
            idx += 1;
        }
        if self.until.is_some() {
            conditions.push(format!("check_in_time < ${}", idx));
            idx += 1;
        }
        if self.status.is_some() {
            conditions.push(format!("status = ${}", idx));
        }

        if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        }
    }
}

#[derive(Clone)]
pub struct VisitorsRepository {
    db: Arc<Database>,
}

impl VisitorsRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// List visitors, most recent check-in first
    pub async fn list(&self, filter: &VisitorFilter) -> AppResult<Vec<Visitor>> {
        let query = format!(
            "SELECT * FROM visitors {} ORDER BY check_in_time DESC, id DESC",
            filter.where_clause()
        );
        let query = query.as_str();

        let rows = self
            .db
            .safe_query(move |pool| async move {
                let mut builder = sqlx::query_as::<_, Visitor>(query);
                if let Some(from) = filter.from {
                    builder = builder.bind(from);
                }
                if let Some(until) = filter.until {
                    builder = builder.bind(until);
                }
                if let Some(status) = filter.status {
                    builder = builder.bind(status);
                }
                builder.fetch_all(&pool).await
            })
            .await?;
        Ok(rows)
    }

    /// Get visitor by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Visitor> {
        self.db
            .safe_query(move |pool| async move {
                sqlx::query_as::<_, Visitor>("SELECT * FROM visitors WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&pool)
                    .await
            })
            .await?
            .ok_or_else(|| AppError::NotFound("Visitor not found".to_string()))
    }

    /// Insert a checked-in visitor; the check-in time comes from the database clock
    pub async fn check_in(&self, data: &CheckInVisitor) -> AppResult<Visitor> {
        let row = self
            .db
            .safe_insert(move |pool| async move {
                sqlx::query_as::<_, Visitor>(
                    r#"
                    INSERT INTO visitors (
                        name, email, phone, company, purpose, host_name, host_department,
                        badge_number, photo_url, id_proof_type, id_proof_number, vehicle_number,
                        has_laptop, laptop_make, laptop_model, laptop_serial,
                        check_in_time, check_out_time, status, notes
                    ) VALUES (
                        $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                        $13, $14, $15, $16, NOW(), NULL, $17, $18
                    )
                    RETURNING *
                    "#,
                )
                .bind(&data.name)
                .bind(&data.email)
                .bind(&data.phone)
                .bind(&data.company)
                .bind(&data.purpose)
                .bind(&data.host_name)
                .bind(&data.host_department)
                .bind(&data.badge_number)
                .bind(&data.photo_url)
                .bind(&data.id_proof_type)
                .bind(&data.id_proof_number)
                .bind(&data.vehicle_number)
                .bind(data.has_laptop)
                .bind(&data.laptop_make)
                .bind(&data.laptop_model)
                .bind(&data.laptop_serial)
                .bind(VisitorStatus::CheckedIn)
                .bind(&data.notes)
                .fetch_one(&pool)
                .await
            })
            .await?;
        Ok(row)
    }

    /// Mark a visitor as checked out.
    ///
    /// No guard against repeated checkouts: a second call overwrites
    /// check_out_time.
    pub async fn check_out(&self, id: i32) -> AppResult<Visitor> {
        self.db
            .safe_insert(move |pool| async move {
                sqlx::query_as::<_, Visitor>(
                    r#"
                    UPDATE visitors
                    SET check_out_time = NOW(), status = $2, updated_at = NOW()
                    WHERE id = $1
                    RETURNING *
                    "#,
                )
                .bind(id)
                .bind(VisitorStatus::CheckedOut)
                .fetch_optional(&pool)
                .await
            })
            .await?
            .ok_or_else(|| AppError::NotFound("Visitor not found".to_string()))
    }
}
