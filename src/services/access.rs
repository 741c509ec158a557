// src/services/access.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AccessRepository, AccessStore},
    models::access::{Profile, Role, RolePayload, PermissionSet, ADMIN_ROLE},
};

/// Decisão em dois níveis: o cargo sentinela enxerga tudo; os demais recebem
/// exatamente a lista gravada no cargo, ou só o painel se o cargo não existe.
pub fn permissions_for(profile_role: &str, role: Option<&Role>) -> PermissionSet {
    if profile_role == ADMIN_ROLE {
        return PermissionSet::full();
    }
    match role {
        Some(role) => PermissionSet::from_tokens(role.permissions.clone()),
        None => PermissionSet::minimal(),
    }
}

// ---
// Resolvedor de permissões
// ---
#[derive(Clone)]
pub struct PermissionResolver {
    store: Arc<dyn AccessStore>,
}

impl PermissionResolver {
    pub fn new(store: Arc<dyn AccessStore>) -> Self {
        Self { store }
    }

    /// Versão estrita: falha na leitura do perfil vira `ProfileLookup`.
    pub async fn try_resolve(&self, user_id: Uuid) -> Result<PermissionSet, AppError> {
        let profile = match self.store.find_profile(user_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => return Err(AppError::ProfileLookup(user_id.to_string())),
            Err(e) => {
                tracing::warn!("Falha ao buscar perfil {}: {}", user_id, e);
                return Err(AppError::ProfileLookup(user_id.to_string()));
            }
        };

        // O administrador nunca depende da tabela de cargos
        if profile.role == ADMIN_ROLE {
            return Ok(PermissionSet::full());
        }

        let role = self.store.find_role_by_name(&profile.role).await?;
        if role.is_none() {
            tracing::warn!(
                "Cargo '{}' do usuário {} não existe; liberando apenas o painel.",
                profile.role,
                user_id
            );
        }

        Ok(permissions_for(&profile.role, role.as_ref()))
    }

    /// Nunca bloqueia o login: qualquer falha de consulta cai no conjunto mínimo.
    pub async fn resolve(&self, user_id: Uuid) -> PermissionSet {
        match self.try_resolve(user_id).await {
            Ok(permissions) => permissions,
            Err(e) => {
                tracing::warn!("Permissões de {} degradadas para o mínimo: {}", user_id, e);
                PermissionSet::minimal()
            }
        }
    }

    pub async fn find_profile(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        self.store.find_profile(user_id).await
    }
}

// ---
// Administração (perfis e cargos)
// ---
#[derive(Clone)]
pub struct AccessService {
    repo: AccessRepository,
}

/// Descrição gerada quando o formulário não informa uma.
pub fn default_role_description(permission_count: usize) -> String {
    format!("Perfil personalizado com {} permissões", permission_count)
}

/// Nome de cargo sem espaços nas pontas; vazio é erro de validação.
pub fn role_name<'a>(field: &'static str, raw: &'a str) -> Result<&'a str, AppError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::field(field, "required", "O nome do perfil é obrigatório."));
    }
    Ok(name)
}

fn role_description(payload: &RolePayload) -> String {
    payload
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| default_role_description(payload.permissions.len()))
}

impl AccessService {
    pub fn new(repo: AccessRepository) -> Self {
        Self { repo }
    }

    pub async fn list_profiles(&self) -> Result<Vec<Profile>, AppError> {
        self.repo.list_profiles().await
    }

    pub async fn update_profile_role(&self, id: Uuid, role: &str) -> Result<Profile, AppError> {
        let role = role_name("role", role)?;
        let profile = self.repo.update_profile_role(id, role).await?;
        tracing::info!("Cargo do usuário {} alterado para '{}'", id, profile.role);
        Ok(profile)
    }

    pub async fn delete_profile(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.delete_profile(id).await?;
        tracing::info!("Acesso do usuário {} removido", id);
        Ok(())
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>, AppError> {
        self.repo.list_roles().await
    }

    pub async fn create_role(&self, payload: RolePayload) -> Result<Role, AppError> {
        let name = role_name("name", &payload.name)?;
        let description = role_description(&payload);

        let role = self
            .repo
            .create_role(name, &description, &payload.permissions)
            .await?;
        tracing::info!("Perfil de acesso '{}' criado", role.name);
        Ok(role)
    }

    pub async fn update_role(&self, id: Uuid, payload: RolePayload) -> Result<Role, AppError> {
        let name = role_name("name", &payload.name)?;
        let description = role_description(&payload);

        self.repo
            .update_role(id, name, &description, &payload.permissions)
            .await
    }
}
