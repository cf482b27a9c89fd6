//! Application route configuration.

use axum::{extract::State, http::StatusCode, middleware, response::Json, routing::get, Router};
use serde::Serialize;
use tower_http::{services::ServeDir, trace::TraceLayer};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{auth_routes, dashboard_routes, invoice_routes};
use super::middleware::access_middleware;
use super::openapi::ApiDoc;
use super::AppState;
use crate::infra::HealthProbe;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .merge(auth_routes())
        .merge(dashboard_routes())
        .merge(invoice_routes())
        .nest_service("/static", static_files)
        // Global middleware
        .layer(middleware::from_fn_with_state(
            state.clone(),
            access_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Welcome to Acme. Sign in at /login to manage your invoices."
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    status: &'static str,
    services: ServiceHealth,
}

/// Individual service health status
#[derive(Serialize, ToSchema)]
pub struct ServiceHealth {
    database: ServiceStatus,
    redis: ServiceStatus,
}

/// Service status
#[derive(Serialize, ToSchema)]
pub struct ServiceStatus {
    #[schema(example = "healthy")]
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn probe(target: &dyn HealthProbe) -> ServiceStatus {
    match target.ping().await {
        Ok(()) => ServiceStatus {
            status: "healthy",
            error: None,
        },
        Err(e) => ServiceStatus {
            status: "unhealthy",
            error: Some(e.to_string()),
        },
    }
}

/// Health check endpoint with database and Redis connectivity check
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "All dependencies reachable", body = HealthResponse),
        (status = 503, description = "At least one dependency unreachable", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (db_status, redis_status) =
        tokio::join!(probe(state.database.as_ref()), probe(state.cache.as_ref()));

    let all_healthy = db_status.status == "healthy" && redis_status.status == "healthy";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" },
        services: ServiceHealth {
            database: db_status,
            redis: redis_status,
        },
    };

    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
