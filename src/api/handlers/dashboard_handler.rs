//! Dashboard landing page.

use axum::{extract::State, response::Json, routing::get, Extension, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::DASHBOARD_PATH;
use crate::domain::Identity;
use crate::errors::AppResult;
use crate::services::DashboardSummary;

/// Signed-in user and headline figures
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardPage {
    pub user: Identity,
    pub summary: DashboardSummary,
}

/// Create dashboard routes
pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route(DASHBOARD_PATH, get(dashboard))
}

/// Dashboard overview
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Dashboard overview", body = DashboardPage),
        (status = 307, description = "Not signed in; redirected to sign-in")
    ),
    security(("session_cookie" = []))
)]
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<DashboardPage>> {
    let summary = state.invoice_service.summary().await?;
    Ok(Json(DashboardPage {
        user: user.into(),
        summary,
    }))
}
