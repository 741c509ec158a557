// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

use crate::{
    common::error::AppError,
    config::AppState,
    models::{access::PermissionSet, auth::User},
};

/// Estado da sessão visto pelos handlers: identidade + telas liberadas.
/// Só o `auth_guard` escreve; o resto apenas lê.
#[derive(Debug, Clone)]
pub struct AccessContext {
    pub user: User,
    pub permissions: PermissionSet,
}

// Valida o token e resolve as permissões de novo a cada requisição
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let bearer = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or(AppError::InvalidToken)?;

    let user = app_state.auth_service.validate_token(bearer.token()).await?;
    let permissions = app_state.permission_resolver.resolve(user.id).await;

    tracing::debug!("Sessão de {} com telas {:?}", user.id, permissions.tokens());

    request.extensions_mut().insert(AccessContext { user, permissions });
    Ok(next.run(request).await)
}

// Extrator para obter o usuário autenticado diretamente nos handlers
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AccessContext>()
            .map(|ctx| AuthenticatedUser(ctx.user.clone()))
            .ok_or(AppError::InvalidToken)
    }
}

impl<S> FromRequestParts<S> for AccessContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AccessContext>()
            .cloned()
            .ok_or(AppError::InvalidToken)
    }
}
