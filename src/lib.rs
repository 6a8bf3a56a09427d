//! Visitor Desk - Visitor Management Server
//!
//! REST JSON API for visitor check-in/check-out, hosts, reference data and
//! statistics, backed by PostgreSQL through a self-healing connection pool.

use std::{sync::Arc, time::Instant};

pub mod api;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use crate::config::AppConfig;
pub use crate::error::{AppError, AppResult};

use crate::database::Database;
use crate::repository::Repository;
use crate::services::Services;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<Services>,
    pub database: Arc<Database>,
    pub started_at: Instant,
}

impl AppState {
    /// Wire repositories and services over the data-access context
    pub fn new(config: AppConfig, database: Arc<Database>) -> Self {
        let repository = Repository::new(database.clone());
        Self {
            config: Arc::new(config),
            services: Arc::new(Services::new(repository)),
            database,
            started_at: Instant::now(),
        }
    }
}
