//! Visitors service

use validator::Validate;

use crate::{
    error::AppResult,
    models::visitor::{CheckInVisitor, Visitor, VisitorQuery},
    repository::{visitors::VisitorFilter, Repository},
};

use super::export;

#[derive(Clone)]
pub struct VisitorsService {
    repository: Repository,
}

impl VisitorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List visitors matching the query filters
    pub async fn list(&self, query: &VisitorQuery) -> AppResult<Vec<Visitor>> {
        self.repository.visitors.list(&VisitorFilter::from(query)).await
    }

    pub async fn get(&self, id: i32) -> AppResult<Visitor> {
        self.repository.visitors.get_by_id(id).await
    }

    /// Validate and register a new visit (status checked_in)
    pub async fn check_in(&self, data: CheckInVisitor) -> AppResult<Visitor> {
        let data = data.normalized();
        data.validate()?;

        let visitor = self.repository.visitors.check_in(&data).await?;
        tracing::info!(visitor_id = visitor.id, host = %visitor.host_name, "Visitor checked in");
        Ok(visitor)
    }

    pub async fn check_out(&self, id: i32) -> AppResult<Visitor> {
        let visitor = self.repository.visitors.check_out(id).await?;
        tracing::info!(visitor_id = visitor.id, "Visitor checked out");
        Ok(visitor)
    }

    /// CSV document for the query filters
    pub async fn export_csv(&self, query: &VisitorQuery) -> AppResult<String> {
        let visitors = self.list(query).await?;
        tracing::debug!(rows = visitors.len(), "Exporting visitors as CSV");
        Ok(export::visitors_to_csv(&visitors))
    }
}
