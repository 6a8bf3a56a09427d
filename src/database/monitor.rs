//! Periodic connection monitoring

use std::{sync::Arc, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};

use super::Database;
use crate::config::MonitorConfig;

/// Handles of the two background monitors
pub struct HealthMonitor {
    keepalive: JoinHandle<()>,
    health_check: JoinHandle<()>,
}

impl HealthMonitor {
    /// Spawn the keep-alive and health-check loops on the current runtime.
    pub fn spawn(database: Arc<Database>, config: &MonitorConfig) -> Self {
        let keepalive = spawn_loop(
            "keep-alive",
            config.keepalive_interval(),
            database.clone(),
            |db| async move {
                db.keep_alive().await;
            },
        );
        let health_check = spawn_loop(
            "health-check",
            config.health_check_interval(),
            database,
            |db| async move {
                db.health_check().await;
            },
        );

        tracing::info!(
            keepalive_secs = config.keepalive_interval_secs,
            health_check_secs = config.health_check_interval_secs,
            "Database monitors started"
        );

        Self {
            keepalive,
            health_check,
        }
    }

    /// Stop both loops
    pub fn shutdown(self) {
        self.keepalive.abort();
        self.health_check.abort();
        tracing::info!("Database monitors stopped");
    }
}

fn spawn_loop<F, Fut>(name: &'static str, period: Duration, database: Arc<Database>, tick: F) -> JoinHandle<()>
where
    F: Fn(Arc<Database>) -> Fut + Send + 'static,
    Fut: std::future::Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; startup already tested the connection.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            tracing::trace!(monitor = name, "tick");
            tick(database.clone()).await;
        }
    })
}
