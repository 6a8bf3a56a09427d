//! Visitor Desk Server - Visitor Management System
//!
//! REST API server for visitor check-in/check-out with a self-healing
//! PostgreSQL connection pool.

use std::{net::SocketAddr, sync::Arc, time::Duration};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use visitor_desk::{
    api,
    config::{AppConfig, LoggingConfig},
    database::{monitor::HealthMonitor, Database, PoolSettings},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing; keep the guard alive so file logs are flushed
    let _log_guard = init_tracing(&config.logging);

    // Errors in one request or task must not bring the process down
    std::panic::set_hook(Box::new(|info| {
        tracing::error!(panic = %info, "Unhandled panic");
    }));

    tracing::info!("Starting Visitor Desk Server v{}", env!("CARGO_PKG_VERSION"));

    // Create the data-access context; the pool connects lazily
    let database = Arc::new(Database::new(
        config.database.connect_options()?,
        PoolSettings::from_config(&config.database, &config.monitor),
    ));

    // Startup connection test: a failure is logged and recovered later
    if database.ensure_connection().await {
        tracing::info!("Connected to database");

        if config.database.run_migrations {
            let pool = database.pool().await;
            match sqlx::migrate!("./migrations").run(&pool).await {
                Ok(()) => tracing::info!("Database migrations completed"),
                Err(e) => tracing::error!(error = %e, "Failed to run database migrations"),
            }
        }
    } else {
        tracing::error!("Database connection failed; check the database settings and that the server is running");
    }

    let monitor = HealthMonitor::spawn(database.clone(), &config.monitor);

    // Save server address before moving config
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);

    // Create application state and router
    let state = AppState::new(config, database.clone());
    let app = api::router(state);

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Health check: http://{}/api/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    monitor.shutdown();
    database.close().await;
    tracing::info!("Server closed. Database pool ended.");

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("visitor_desk={},tower_http=info", logging.level).into());

    let json = logging.format.eq_ignore_ascii_case("json");

    let (file_layer, guard) = match &logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "visitor-desk.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(|| fmt::layer()))
        .with(file_layer)
        .init();

    guard
}

/// Resolve on SIGINT/SIGTERM and arm the forced-exit timer
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("SIGINT received. Closing server..."),
        _ = terminate => tracing::info!("SIGTERM received. Closing server..."),
    }

    tokio::spawn(async move {
        tokio::time::sleep(timeout).await;
        tracing::error!(timeout_secs = timeout.as_secs(), "Graceful shutdown timed out, forcing exit");
        std::process::exit(1);
    });
}
