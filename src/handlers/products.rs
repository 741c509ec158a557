// src/handlers/products.rs

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
    middleware::{
        access::{ProductsScreen, RequireScreen},
        auth::AuthenticatedUser,
    },
    models::inventory::{Product, ProductPayload},
};

// GET /api/products
// Também alimenta os seletores das telas de entrada e saída.
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses((status = 200, description = "Produtos, mais recentes primeiro", body = Vec<Product>)),
    security(("api_jwt" = []))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(app_state.inventory_service.list_products().await?))
}

// GET /api/products/categories
#[utoipa::path(
    get,
    path = "/api/products/categories",
    tag = "Products",
    responses((status = 200, description = "Categorias distintas dos produtos", body = Vec<String>)),
    security(("api_jwt" = []))
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(app_state.inventory_service.list_categories().await?))
}

// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Produto cadastrado", body = Product),
        (status = 400, description = "Nome ou SKU ausentes"),
        (status = 409, description = "SKU já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    _guard: RequireScreen<ProductsScreen>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let product = app_state.inventory_service.create_product(payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

// PUT /api/products/{id}
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "ID do produto")),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Produto atualizado", body = Product),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    _guard: RequireScreen<ProductsScreen>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<Product>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.inventory_service.update_product(id, payload).await?))
}

// DELETE /api/products/{id}
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 204, description = "Produto excluído"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    _guard: RequireScreen<ProductsScreen>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.inventory_service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
