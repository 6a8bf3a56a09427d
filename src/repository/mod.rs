//! Repository layer for database operations

pub mod hosts;
pub mod lookups;
pub mod settings;
pub mod statistics;
pub mod visitors;

use std::sync::Arc;

use crate::database::Database;

/// Main repository struct: one sub-repository per table
#[derive(Clone)]
pub struct Repository {
    pub visitors: visitors::VisitorsRepository,
    pub hosts: hosts::HostsRepository,
    pub lookups: lookups::LookupsRepository,
    pub settings: settings::SettingsRepository,
    pub statistics: statistics::StatisticsRepository,
}

impl Repository {
    /// Create a new repository over the given data-access context
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            visitors: visitors::VisitorsRepository::new(db.clone()),
            hosts: hosts::HostsRepository::new(db.clone()),
            lookups: lookups::LookupsRepository::new(db.clone()),
            settings: settings::SettingsRepository::new(db.clone()),
            statistics: statistics::StatisticsRepository::new(db),
        }
    }
}
