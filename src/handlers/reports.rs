// src/handlers/reports.rs

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::access::{ReportsScreen, RequireScreen},
    models::inventory::{MovementWithProduct, ReportQuery},
};

// GET /api/reports/movements?type=saída&category=Limpeza
#[utoipa::path(
    get,
    path = "/api/reports/movements",
    tag = "Reports",
    params(ReportQuery),
    responses(
        (status = 200, description = "Log de movimentações, mais recentes primeiro", body = Vec<MovementWithProduct>),
        (status = 403, description = "Sem acesso à tela de relatórios")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_movements(
    State(app_state): State<AppState>,
    _guard: RequireScreen<ReportsScreen>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Vec<MovementWithProduct>>, AppError> {
    let movements = app_state
        .report_service
        .movements(query.movement_type.as_deref(), query.category.as_deref())
        .await?;

    Ok(Json(movements))
}

// GET /api/reports/movements.pdf?type=saída&category=Limpeza
#[utoipa::path(
    get,
    path = "/api/reports/movements.pdf",
    tag = "Reports",
    params(ReportQuery),
    responses(
        (status = 200, description = "Log filtrado em PDF", content_type = "application/pdf", body = Vec<u8>),
        (status = 403, description = "Sem acesso à tela de relatórios")
    ),
    security(("api_jwt" = []))
)]
pub async fn export_movements_pdf(
    State(app_state): State<AppState>,
    _guard: RequireScreen<ReportsScreen>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let now = Utc::now();
    let pdf_bytes = app_state
        .report_service
        .movements_pdf(query.movement_type.as_deref(), query.category.as_deref(), now)
        .await?;

    // Cabeçalhos para o navegador baixar ou mostrar o PDF
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"movimentacoes_{}.pdf\"", now.format("%Y%m%d_%H%M")),
        ),
    ];

    Ok((headers, pdf_bytes))
}
