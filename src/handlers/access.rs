// src/handlers/access.rs

use axum::{
    extract::{Path, Query, State},
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
        access::{AdminScreen, RequireScreen},
        auth::AccessContext,
    },
    models::access::{
        NavigationQuery, NavigationResponse, PermissionSet, Profile, Role, RolePayload, Screen,
        ScreenInfo, UpdateProfileRolePayload,
    },
};

// GET /api/users/me/permissions
#[utoipa::path(
    get,
    path = "/api/users/me/permissions",
    tag = "Users",
    responses((status = 200, description = "Telas liberadas para a sessão", body = PermissionSet)),
    security(("api_jwt" = []))
)]
pub async fn my_permissions(ctx: AccessContext) -> Json<PermissionSet> {
    Json(ctx.permissions)
}

// GET /api/users/me/navigation?view=reports
#[utoipa::path(
    get,
    path = "/api/users/me/navigation",
    tag = "Users",
    params(NavigationQuery),
    responses(
        (status = 200, description = "Tela efetivamente exibida", body = NavigationResponse),
        (status = 400, description = "Tela desconhecida")
    ),
    security(("api_jwt" = []))
)]
pub async fn navigate(
    ctx: AccessContext,
    Query(query): Query<NavigationQuery>,
) -> Result<Json<NavigationResponse>, AppError> {
    let requested = match query.view.as_deref() {
        None => ctx.permissions.landing_screen(),
        Some(view) => Screen::from_id(view)
            .ok_or_else(|| AppError::field("view", "unknown_screen", "Tela desconhecida."))?,
    };

    let screen = ctx.permissions.navigate(requested);

    Ok(Json(NavigationResponse {
        requested,
        screen,
        redirected: screen != requested,
        permissions: ctx.permissions,
    }))
}

// GET /api/admin/screens
#[utoipa::path(
    get,
    path = "/api/admin/screens",
    tag = "Admin",
    responses((status = 200, description = "Telas disponíveis para montar cargos", body = Vec<ScreenInfo>)),
    security(("api_jwt" = []))
)]
pub async fn list_screens(_guard: RequireScreen<AdminScreen>) -> Json<Vec<ScreenInfo>> {
    Json(Screen::ALL.into_iter().map(ScreenInfo::from).collect())
}

// GET /api/admin/profiles
#[utoipa::path(
    get,
    path = "/api/admin/profiles",
    tag = "Admin",
    responses((status = 200, description = "Usuários por nome", body = Vec<Profile>)),
    security(("api_jwt" = []))
)]
pub async fn list_profiles(
    State(app_state): State<AppState>,
    _guard: RequireScreen<AdminScreen>,
) -> Result<Json<Vec<Profile>>, AppError> {
    Ok(Json(app_state.access_service.list_profiles().await?))
}

// PATCH /api/admin/profiles/{id}/role
#[utoipa::path(
    patch,
    path = "/api/admin/profiles/{id}/role",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    request_body = UpdateProfileRolePayload,
    responses(
        (status = 200, description = "Cargo atualizado", body = Profile),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_profile_role(
    State(app_state): State<AppState>,
    _guard: RequireScreen<AdminScreen>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProfileRolePayload>,
) -> Result<Json<Profile>, AppError> {
    payload.validate()?;
    let profile = app_state.access_service.update_profile_role(id, &payload.role).await?;
    Ok(Json(profile))
}

// DELETE /api/admin/profiles/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/profiles/{id}",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 204, description = "Acesso removido"),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_profile(
    State(app_state): State<AppState>,
    _guard: RequireScreen<AdminScreen>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.access_service.delete_profile(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/admin/roles
#[utoipa::path(
    get,
    path = "/api/admin/roles",
    tag = "Admin",
    responses((status = 200, description = "Perfis de acesso por nome", body = Vec<Role>)),
    security(("api_jwt" = []))
)]
pub async fn list_roles(
    State(app_state): State<AppState>,
    _guard: RequireScreen<AdminScreen>,
) -> Result<Json<Vec<Role>>, AppError> {
    Ok(Json(app_state.access_service.list_roles().await?))
}

// POST /api/admin/roles
#[utoipa::path(
    post,
    path = "/api/admin/roles",
    tag = "Admin",
    request_body = RolePayload,
    responses(
        (status = 201, description = "Perfil de acesso criado", body = Role),
        (status = 409, description = "Nome já existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_role(
    State(app_state): State<AppState>,
    _guard: RequireScreen<AdminScreen>,
    Json(payload): Json<RolePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let role = app_state.access_service.create_role(payload).await?;
    Ok((StatusCode::CREATED, Json(role)))
}

// PUT /api/admin/roles/{id}
#[utoipa::path(
    put,
    path = "/api/admin/roles/{id}",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID do perfil de acesso")),
    request_body = RolePayload,
    responses(
        (status = 200, description = "Perfil de acesso atualizado", body = Role),
        (status = 404, description = "Perfil de acesso não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_role(
    State(app_state): State<AppState>,
    _guard: RequireScreen<AdminScreen>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RolePayload>,
) -> Result<Json<Role>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.access_service.update_role(id, payload).await?))
}
