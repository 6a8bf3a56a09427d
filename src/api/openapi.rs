//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, hosts, lookups, settings, stats, visitors};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Visitor Desk API",
        version = "1.0.0",
        description = "Visitor Management REST API"
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        // Health
        health::health_check,
        // Visitors
        visitors::list_visitors,
        visitors::get_visitor,
        visitors::check_in,
        visitors::check_out,
        visitors::export_csv,
        // Hosts
        hosts::list_hosts,
        hosts::create_host,
        // Reference data
        lookups::list_departments,
        lookups::list_purposes,
        // Statistics
        stats::dashboard,
        stats::visitor_statistics,
        // Settings
        settings::list_settings,
        settings::update_setting,
    ),
    components(
        schemas(
            // Visitors
            crate::models::visitor::Visitor,
            crate::models::visitor::VisitorStatus,
            crate::models::visitor::CheckInVisitor,
            // Hosts
            crate::models::host::Host,
            crate::models::host::CreateHost,
            // Reference data
            crate::models::lookup::LookupEntry,
            // Statistics
            crate::models::statistics::DashboardStats,
            crate::models::statistics::VisitorStatistics,
            // Settings
            crate::models::setting::Setting,
            crate::models::setting::UpdateSetting,
            // Health
            health::HealthResponse,
            crate::database::PoolStats,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check"),
        (name = "visitors", description = "Visitor check-in, check-out and history"),
        (name = "hosts", description = "Staff receiving visitors"),
        (name = "reference", description = "Departments and visit purposes"),
        (name = "statistics", description = "Dashboard and daily statistics"),
        (name = "settings", description = "Application settings")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
