// src/handlers/movements.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        access::{EntriesScreen, ExitsScreen, RequireScreen},
        auth::AuthenticatedUser,
    },
    models::inventory::{EntryPayload, ExitPayload, Movement},
};

// POST /api/movements/entries
#[utoipa::path(
    post,
    path = "/api/movements/entries",
    tag = "Movements",
    request_body = EntryPayload,
    responses(
        (status = 201, description = "Entrada de estoque registrada", body = Movement),
        (status = 400, description = "Produto ou quantidade ausentes")
    ),
    security(("api_jwt" = []))
)]
pub async fn register_entry(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequireScreen<EntriesScreen>,
    Json(payload): Json<EntryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let movement = app_state
        .inventory_service
        .register_entry(user.id, payload, Utc::now().date_naive())
        .await?;

    Ok((StatusCode::CREATED, Json(movement)))
}

// POST /api/movements/exits
#[utoipa::path(
    post,
    path = "/api/movements/exits",
    tag = "Movements",
    request_body = ExitPayload,
    responses(
        (status = 201, description = "Saída de estoque registrada", body = Movement),
        (status = 400, description = "Quantidade insuficiente ou dados ausentes"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn register_exit(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequireScreen<ExitsScreen>,
    Json(payload): Json<ExitPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let movement = app_state
        .inventory_service
        .register_exit(user.id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(movement)))
}
