//! Business logic services

pub mod directory;
pub mod export;
pub mod settings;
pub mod stats;
pub mod visitors;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub visitors: visitors::VisitorsService,
    pub directory: directory::DirectoryService,
    pub stats: stats::StatsService,
    pub settings: settings::SettingsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            visitors: visitors::VisitorsService::new(repository.clone()),
            directory: directory::DirectoryService::new(repository.clone()),
            stats: stats::StatsService::new(repository.clone()),
            settings: settings::SettingsService::new(repository),
        }
    }
}
