//! Hosts, departments and visit purposes

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        host::{CreateHost, Host},
        lookup::{Department, LookupTable, VisitPurpose},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct DirectoryService {
    repository: Repository,
}

impl DirectoryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn hosts(&self) -> AppResult<Vec<Host>> {
        self.repository.hosts.list_active().await
    }

    pub async fn create_host(&self, data: CreateHost) -> AppResult<Host> {
        let data = data.normalized();
        data.validate()?;
        let host = self.repository.hosts.create(&data).await?;
        tracing::info!(host_id = host.id, "Host created");
        Ok(host)
    }

    pub async fn departments(&self) -> AppResult<Vec<Department>> {
        self.repository.lookups.list_active(LookupTable::Departments).await
    }

    pub async fn purposes(&self) -> AppResult<Vec<VisitPurpose>> {
        self.repository.lookups.list_active(LookupTable::VisitPurposes).await
    }
}
