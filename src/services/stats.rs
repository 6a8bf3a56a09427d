//! Statistics service

use chrono::{NaiveDate, Utc};

use crate::{
    error::{AppError, AppResult},
    models::statistics::{DashboardStats, DashboardWindows, VisitorStatistics},
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Dashboard counters relative to the current time
    pub async fn dashboard(&self) -> AppResult<DashboardStats> {
        let windows = DashboardWindows::at(Utc::now());
        self.repository.statistics.dashboard(&windows).await
    }

    /// Daily aggregates between two dates, inclusive
    pub async fn daily(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<VisitorStatistics>> {
        if start > end {
            return Err(AppError::Validation(
                "startDate must not be after endDate".to_string(),
            ));
        }
        self.repository.statistics.daily(start, end).await
    }
}
