//! API router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{middleware, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::common::{ApiResponse, PaginatedResponse};
use super::modules::health::{self, ComponentHealth, HealthResponse, HealthState};
use super::modules::metrics::{self, http_metrics_middleware, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::users::{self, users_grid, UserDto, UsersState};
use crate::application::grid::DataGrid;
use crate::shared::GridError;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        users::list_users,
        users::export_users,
    ),
    components(
        schemas(
            HealthResponse,
            ComponentHealth,
            UserDto,
            PaginatedResponse<UserDto>,
            ApiResponse<String>,
        )
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Users", description = "Searchable, filterable, sortable user directory"),
    ),
    info(
        title = "Data Grid Service API",
        version = "1.0.0",
        description = "Paginated, searchable, filterable and exportable list endpoints",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes.
///
/// Fails when a grid is misconfigured, so a broken endpoint stops startup
/// instead of surfacing on the first request.
pub fn create_api_router(
    db: DatabaseConnection,
    data_grid: &DataGrid,
    prometheus: PrometheusHandle,
) -> Result<Router, GridError> {
    let users_state = UsersState {
        db: db.clone(),
        grid: Arc::new(users_grid(data_grid)?),
    };
    let health_state = HealthState {
        db,
        started_at: Arc::new(Instant::now()),
    };
    let metrics_state = MetricsState { handle: prometheus };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Ok(Router::new()
        .merge(swagger_routes)
        .merge(health::router(health_state))
        .merge(metrics::router(metrics_state))
        .merge(users::router(users_state))
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_grid_endpoints() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/users"));
        assert!(doc.paths.paths.contains_key("/api/v1/users/export"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
