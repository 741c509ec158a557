// src/handlers/dashboard.rs

use axum::{extract::State, Json};
use chrono::Utc;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::access::{DashboardScreen, RequireScreen},
    models::dashboard::DashboardSummary,
};

// GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Cards, consumo semanal e validades próximas", body = DashboardSummary),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    _guard: RequireScreen<DashboardScreen>,
) -> Result<Json<DashboardSummary>, AppError> {
    let summary = app_state.dashboard_service.get_summary(Utc::now()).await?;
    Ok(Json(summary))
}
