//! API handlers for Visitor Desk REST endpoints

pub mod extract;
pub mod health;
pub mod hosts;
pub mod lookups;
pub mod openapi;
pub mod settings;
pub mod stats;
pub mod visitors;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use std::any::Any;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{AllowOrigin, Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::{AppError, ErrorResponse},
    AppState,
};

/// Reject requests while the database is down, after one inline reconnect attempt
pub async fn connection_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if !state.database.is_connected() && !state.database.ensure_connection().await {
        tracing::warn!(path = %request.uri().path(), "Rejecting request, database unavailable");
        return AppError::Unavailable("Database connection unavailable, retrying".to_string())
            .into_response();
    }
    next.run(request).await
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(panic = %detail, "Request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("Internal server error")),
    )
        .into_response()
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if allowed_origins.is_empty() {
        return cors.allow_origin(AnyOrigin);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.allowed_origins);

    // Everything except /health needs the database
    let gated = Router::new()
        // Visitors
        .route("/visitors", get(visitors::list_visitors))
        .route("/visitors/checkin", post(visitors::check_in))
        .route("/visitors/export/csv", get(visitors::export_csv))
        .route("/visitors/:id", get(visitors::get_visitor))
        .route("/visitors/:id/checkout", put(visitors::check_out))
        // Hosts
        .route("/hosts", get(hosts::list_hosts).post(hosts::create_host))
        // Reference data
        .route("/departments", get(lookups::list_departments))
        .route("/purposes", get(lookups::list_purposes))
        // Statistics
        .route("/statistics/dashboard", get(stats::dashboard))
        .route("/statistics/visitors", get(stats::visitor_statistics))
        // Settings
        .route("/settings", get(settings::list_settings))
        .route("/settings/:key", put(settings::update_setting))
        .route_layer(middleware::from_fn_with_state(state.clone(), connection_gate));

    let api = Router::new()
        .route("/health", get(health::health_check))
        .merge(gated)
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .merge(openapi::create_openapi_router())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
