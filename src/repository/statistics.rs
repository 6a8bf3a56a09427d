//! Statistics repository

use chrono::NaiveDate;
use std::sync::Arc;

use crate::{
    database::Database,
    error::AppResult,
    models::{
        statistics::{DashboardStats, DashboardWindows, VisitorStatistics},
        visitor::VisitorStatus,
    },
};

#[derive(Clone)]
pub struct StatisticsRepository {
    db: Arc<Database>,
}

impl StatisticsRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Dashboard counters for the given windows
    pub async fn dashboard(&self, windows: &DashboardWindows) -> AppResult<DashboardStats> {
        let row = self
            .db
            .safe_query(move |pool| async move {
                sqlx::query_as::<_, DashboardStats>(
                    r#"
                    SELECT
                        COUNT(*) FILTER (WHERE check_in_time >= $1 AND check_in_time < $2) AS today_visitors,
                        COUNT(*) FILTER (WHERE status = $3) AS currently_checked_in,
                        COUNT(*) FILTER (WHERE check_in_time >= $4) AS week_visitors,
                        COUNT(*) FILTER (WHERE check_in_time >= $5 AND check_in_time < $6) AS month_visitors
                    FROM visitors
                    "#,
                )
                .bind(windows.today_start)
                .bind(windows.tomorrow_start)
                .bind(VisitorStatus::CheckedIn)
                .bind(windows.week_start)
                .bind(windows.month_start)
                .bind(windows.next_month_start)
                .fetch_one(&pool)
                .await
            })
            .await?;
        Ok(row)
    }

    /// Daily rows between two dates, inclusive, newest first
    pub async fn daily(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<VisitorStatistics>> {
        let rows = self
            .db
            .safe_query(move |pool| async move {
                sqlx::query_as::<_, VisitorStatistics>(
                    r#"
                    SELECT visit_date, total_visitors, checked_in, checked_out, unique_hosts, unique_companies
                    FROM visitor_statistics
                    WHERE visit_date BETWEEN $1 AND $2
                    ORDER BY visit_date DESC
                    "#,
                )
                .bind(start)
                .bind(end)
                .fetch_all(&pool)
                .await
            })
            .await?;
        Ok(rows)
    }
}
