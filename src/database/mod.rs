//! Resilient data-access context.
//!
//! [`Database`] owns the connection pool and the process-wide connection
//! state. It is created once by `main` and shared through `Arc` with the
//! repositories, the connection gate and the health monitors.

pub mod monitor;
pub mod retry;
pub mod transient;

use async_trait::async_trait;
use serde::Serialize;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    Connection, PgPool,
};
use std::{
    future::Future,
    sync::atomic::{AtomicBool, AtomicU32, Ordering},
    time::Duration,
};
use tokio::sync::RwLock;
use utoipa::ToSchema;

use crate::config::{DatabaseConfig, MonitorConfig};

pub use retry::{retry_once, Reconnect};
pub use transient::TransientKind;

/// Pool construction parameters
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub base_backoff: Duration,
    pub max_backoff: Duration,
    /// Bound on a single liveness ping
    pub ping_timeout: Duration,
}

impl PoolSettings {
    pub fn from_config(database: &DatabaseConfig, monitor: &MonitorConfig) -> Self {
        Self {
            max_connections: database.max_connections,
            acquire_timeout: database.acquire_timeout(),
            base_backoff: Duration::from_millis(monitor.base_backoff_ms),
            max_backoff: Duration::from_millis(monitor.max_backoff_ms),
            ping_timeout: monitor.ping_timeout(),
        }
    }
}

/// Snapshot of the current pool
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PoolStats {
    /// Open connections (idle and in use)
    pub size: u32,
    /// Idle connections
    pub idle: usize,
    pub max_connections: u32,
}

/// Backoff hint after `retries` consecutive failed reconnects.
///
/// Only reported in logs; nothing sleeps on it. The next periodic check or
/// the next request drives the following attempt.
pub fn backoff_delay(retries: u32, base: Duration, max: Duration) -> Duration {
    let factor = 1u32.checked_shl(retries).unwrap_or(u32::MAX);
    base.saturating_mul(factor).min(max)
}

pub struct Database {
    pool: RwLock<PgPool>,
    connect_options: PgConnectOptions,
    settings: PoolSettings,
    connected: AtomicBool,
    retries: AtomicU32,
}

impl Database {
    /// Build the context with a fresh, not yet connected pool.
    pub fn new(connect_options: PgConnectOptions, settings: PoolSettings) -> Self {
        let pool = Self::create_pool(&connect_options, &settings);
        Self {
            pool: RwLock::new(pool),
            connect_options,
            settings,
            connected: AtomicBool::new(false),
            retries: AtomicU32::new(0),
        }
    }

    /// Build a lazily connecting pool.
    ///
    /// Connections are never closed for idleness or age, waiters queue
    /// without bound and acquiring a connection is capped by
    /// `acquire_timeout`.
    pub fn create_pool(connect_options: &PgConnectOptions, settings: &PoolSettings) -> PgPool {
        PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .min_connections(0)
            .idle_timeout(None)
            .max_lifetime(None)
            .acquire_timeout(settings.acquire_timeout)
            .test_before_acquire(true)
            .connect_lazy_with(connect_options.clone())
    }

    /// Current pool handle (cheap clone)
    pub async fn pool(&self) -> PgPool {
        self.pool.read().await.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    pub fn retries(&self) -> u32 {
        self.retries.load(Ordering::SeqCst)
    }

    pub fn mark_disconnected(&self) {
        if self.connected.swap(false, Ordering::SeqCst) {
            tracing::warn!("Database marked as disconnected");
        }
    }

    fn mark_connected(&self) {
        if !self.connected.swap(true, Ordering::SeqCst) {
            tracing::info!("Database connected");
        }
        self.retries.store(0, Ordering::SeqCst);
    }

    pub async fn pool_stats(&self) -> PoolStats {
        let pool = self.pool().await;
        PoolStats {
            size: pool.size(),
            idle: pool.num_idle(),
            max_connections: self.settings.max_connections,
        }
    }

    async fn bounded<F>(&self, ping: F) -> Result<(), sqlx::Error>
    where
        F: Future<Output = Result<(), sqlx::Error>>,
    {
        tokio::time::timeout(self.settings.ping_timeout, ping)
            .await
            .unwrap_or(Err(sqlx::Error::PoolTimedOut))
    }

    /// Trivial query straight on the pool
    pub async fn ping_pool(&self) -> Result<(), sqlx::Error> {
        let pool = self.pool().await;
        self.bounded(async move {
            sqlx::query("SELECT 1").execute(&pool).await?;
            Ok(())
        })
        .await
    }

    /// Acquire one connection, ping it and hand it back
    pub async fn ping_connection(&self) -> Result<(), sqlx::Error> {
        let pool = self.pool().await;
        self.bounded(async move {
            let mut conn = pool.acquire().await?;
            conn.ping().await
        })
        .await
    }

    /// Swap in a brand new pool; the old one is closed in the background.
    pub async fn replace_pool(&self) {
        let fresh = Self::create_pool(&self.connect_options, &self.settings);
        let old = std::mem::replace(&mut *self.pool.write().await, fresh);
        tokio::spawn(async move {
            old.close().await;
        });
    }

    /// Check the connection; on failure rebuild the pool and report failure.
    ///
    /// Never sleeps: the computed backoff is only logged.
    pub async fn ensure_connection(&self) -> bool {
        match self.ping_connection().await {
            Ok(()) => {
                self.mark_connected();
                true
            }
            Err(err) => {
                self.mark_disconnected();
                self.replace_pool().await;
                let retries = self.retries.fetch_add(1, Ordering::SeqCst).saturating_add(1);
                let delay = backoff_delay(retries, self.settings.base_backoff, self.settings.max_backoff);
                tracing::warn!(
                    error = %err,
                    retries,
                    next_attempt_ms = delay.as_millis() as u64,
                    "Database connection check failed, pool recreated"
                );
                false
            }
        }
    }

    /// Keep-alive tick: cheap query; on failure one replace-and-retest cycle.
    pub async fn keep_alive(&self) -> bool {
        match self.ping_pool().await {
            Ok(()) => {
                tracing::debug!("Database keep-alive ping successful");
                self.mark_connected();
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "Database keep-alive failed, recreating pool");
                self.mark_disconnected();
                self.replace_pool().await;
                match self.ping_pool().await {
                    Ok(()) => {
                        self.mark_connected();
                        true
                    }
                    Err(err) => {
                        let retries = self.retries.fetch_add(1, Ordering::SeqCst).saturating_add(1);
                        tracing::error!(error = %err, retries, "Database still unreachable after pool recreation");
                        false
                    }
                }
            }
        }
    }

    /// Health-check tick: ping one connection, delegate recovery on failure.
    pub async fn health_check(&self) -> bool {
        match self.ping_connection().await {
            Ok(()) => {
                self.mark_connected();
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "Database health check failed");
                self.mark_disconnected();
                self.ensure_connection().await
            }
        }
    }

    /// Run a read statement with the retry-once policy.
    pub async fn safe_query<T, F, Fut>(&self, op: F) -> Result<T, sqlx::Error>
    where
        F: Fn(PgPool) -> Fut,
        Fut: Future<Output = Result<T, sqlx::Error>>,
    {
        self.run("query", op).await
    }

    /// Run a write statement with the retry-once policy.
    pub async fn safe_insert<T, F, Fut>(&self, op: F) -> Result<T, sqlx::Error>
    where
        F: Fn(PgPool) -> Fut,
        Fut: Future<Output = Result<T, sqlx::Error>>,
    {
        self.run("insert", op).await
    }

    async fn run<T, F, Fut>(&self, label: &str, op: F) -> Result<T, sqlx::Error>
    where
        F: Fn(PgPool) -> Fut,
        Fut: Future<Output = Result<T, sqlx::Error>>,
    {
        let op = &op;
        retry_once(self, label, move || async move { op(self.pool().await).await }).await
    }

    /// Close the current pool (shutdown)
    pub async fn close(&self) {
        self.pool().await.close().await;
        self.connected.store(false, Ordering::SeqCst);
    }
}

#[async_trait]
impl Reconnect for Database {
    async fn ensure_connection(&self) -> bool {
        Database::ensure_connection(self).await
    }
}
