//! Statistics models

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Dashboard counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Visitors checked in today (UTC day)
    pub today_visitors: i64,
    /// Visitors currently on site
    pub currently_checked_in: i64,
    /// Visitors checked in during the last 7 days
    pub week_visitors: i64,
    /// Visitors checked in this calendar month
    pub month_visitors: i64,
}

/// Daily aggregate row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct VisitorStatistics {
    pub visit_date: NaiveDate,
    pub total_visitors: i64,
    pub checked_in: i64,
    pub checked_out: i64,
    pub unique_hosts: i64,
    pub unique_companies: i64,
}

/// Query parameters for daily statistics
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StatisticsQuery {
    /// First day (YYYY-MM-DD), inclusive
    #[param(value_type = String, format = Date)]
    pub start_date: NaiveDate,
    /// Last day (YYYY-MM-DD), inclusive
    #[param(value_type = String, format = Date)]
    pub end_date: NaiveDate,
}

/// Time windows used by the dashboard counters, as UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardWindows {
    pub today_start: DateTime<Utc>,
    pub tomorrow_start: DateTime<Utc>,
    pub week_start: DateTime<Utc>,
    pub month_start: DateTime<Utc>,
    pub next_month_start: DateTime<Utc>,
}

/// Midnight UTC at the start of `date`
pub fn day_start(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

impl DashboardWindows {
    pub fn at(now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let month_first = today.with_day(1).unwrap_or(today);
        let next_month_first = if month_first.month() == 12 {
            NaiveDate::from_ymd_opt(month_first.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(month_first.year(), month_first.month() + 1, 1)
        }
        .unwrap_or(NaiveDate::MAX);

        Self {
            today_start: day_start(today),
            tomorrow_start: day_start(today) + Duration::days(1),
            week_start: now - Duration::days(7),
            month_start: day_start(month_first),
            next_month_start: day_start(next_month_first),
        }
    }
}
