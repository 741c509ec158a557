// src/handlers/inventory.rs

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::access::{InventoryScreen, RequireScreen},
    models::inventory::{InventoryEntry, InventoryQuery},
};

// GET /api/inventory?category=Limpeza
#[utoipa::path(
    get,
    path = "/api/inventory",
    tag = "Inventory",
    params(InventoryQuery),
    responses(
        (status = 200, description = "Níveis de estoque com status por item", body = Vec<InventoryEntry>),
        (status = 403, description = "Sem acesso à tela de estoque")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_inventory(
    State(app_state): State<AppState>,
    _guard: RequireScreen<InventoryScreen>,
    Query(query): Query<InventoryQuery>,
) -> Result<Json<Vec<InventoryEntry>>, AppError> {
    let entries = app_state
        .inventory_service
        .inventory(query.category.as_deref())
        .await?;

    Ok(Json(entries))
}
