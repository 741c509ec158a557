// src/handlers/suppliers.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::access::{RequireScreen, SuppliersScreen},
    models::supplier::{Supplier, SupplierPayload, SUPPLIER_CATEGORIES},
};

// GET /api/suppliers
#[utoipa::path(
    get,
    path = "/api/suppliers",
    tag = "Suppliers",
    responses((status = 200, description = "Fornecedores por nome", body = Vec<Supplier>)),
    security(("api_jwt" = []))
)]
pub async fn list_suppliers(
    State(app_state): State<AppState>,
    _guard: RequireScreen<SuppliersScreen>,
) -> Result<Json<Vec<Supplier>>, AppError> {
    Ok(Json(app_state.supplier_service.list().await?))
}

// GET /api/suppliers/categories
#[utoipa::path(
    get,
    path = "/api/suppliers/categories",
    tag = "Suppliers",
    responses((status = 200, description = "Categorias sugeridas", body = Vec<String>)),
    security(("api_jwt" = []))
)]
pub async fn list_categories(_guard: RequireScreen<SuppliersScreen>) -> Json<Vec<&'static str>> {
    Json(SUPPLIER_CATEGORIES.to_vec())
}

// POST /api/suppliers
#[utoipa::path(
    post,
    path = "/api/suppliers",
    tag = "Suppliers",
    request_body = SupplierPayload,
    responses(
        (status = 201, description = "Fornecedor cadastrado", body = Supplier),
        (status = 400, description = "Nome ausente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_supplier(
    State(app_state): State<AppState>,
    _guard: RequireScreen<SuppliersScreen>,
    Json(payload): Json<SupplierPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let supplier = app_state.supplier_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

// PUT /api/suppliers/{id}
#[utoipa::path(
    put,
    path = "/api/suppliers/{id}",
    tag = "Suppliers",
    params(("id" = Uuid, Path, description = "ID do fornecedor")),
    request_body = SupplierPayload,
    responses(
        (status = 200, description = "Fornecedor atualizado", body = Supplier),
        (status = 404, description = "Fornecedor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_supplier(
    State(app_state): State<AppState>,
    _guard: RequireScreen<SuppliersScreen>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SupplierPayload>,
) -> Result<Json<Supplier>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.supplier_service.update(id, payload).await?))
}

// DELETE /api/suppliers/{id}
#[utoipa::path(
    delete,
    path = "/api/suppliers/{id}",
    tag = "Suppliers",
    params(("id" = Uuid, Path, description = "ID do fornecedor")),
    responses(
        (status = 204, description = "Fornecedor excluído"),
        (status = 404, description = "Fornecedor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_supplier(
    State(app_state): State<AppState>,
    _guard: RequireScreen<SuppliersScreen>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.supplier_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
