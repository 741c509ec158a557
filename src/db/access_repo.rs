// src/db/access_repo.rs

use async_trait::async_trait;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::is_unique_violation,
    models::access::{Profile, Role},
};

/// As duas leituras de que o resolvedor de permissões depende.
#[async_trait]
pub trait AccessStore: Send + Sync {
    async fn find_profile(&self, user_id: Uuid) -> Result<Option<Profile>, AppError>;
    async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>, AppError>;
}

// Perfis e cargos
#[derive(Clone)]
pub struct AccessRepository {
    pool: PgPool,
}

impl AccessRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Perfis
    // ---

    pub async fn create_profile<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        name: &str,
        email: &str,
        role: &str,
    ) -> Result<Profile, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (id, name, email, role)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(email)
        .bind(role)
        .fetch_one(executor)
        .await?;

        Ok(profile)
    }

    pub async fn list_profiles(&self) -> Result<Vec<Profile>, AppError> {
        let profiles = sqlx::query_as::<_, Profile>("SELECT * FROM profiles ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(profiles)
    }

    pub async fn update_profile_role(&self, id: Uuid, role: &str) -> Result<Profile, AppError> {
        sqlx::query_as::<_, Profile>("UPDATE profiles SET role = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(role)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound("Usuário não encontrado."))
    }

    pub async fn delete_profile(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Usuário não encontrado."));
        }
        Ok(())
    }

    // ---
    // Cargos
    // ---

    pub async fn list_roles(&self) -> Result<Vec<Role>, AppError> {
        let roles = sqlx::query_as::<_, Role>("SELECT * FROM roles ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(roles)
    }

    pub async fn create_role(
        &self,
        name: &str,
        description: &str,
        permissions: &[String],
    ) -> Result<Role, AppError> {
        sqlx::query_as::<_, Role>(
            r#"
            INSERT INTO roles (name, description, permissions)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(permissions)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::RoleNameAlreadyExists(name.to_string());
            }
            e.into()
        })
    }

    pub async fn update_role(
        &self,
        id: Uuid,
        name: &str,
        description: &str,
        permissions: &[String],
    ) -> Result<Role, AppError> {
        sqlx::query_as::<_, Role>(
            r#"
            UPDATE roles
            SET name = $2, description = $3, permissions = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(permissions)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::RoleNameAlreadyExists(name.to_string());
            }
            AppError::from(e)
        })?
        .ok_or(AppError::NotFound("Perfil de acesso não encontrado."))
    }
}

#[async_trait]
impl AccessStore for AccessRepository {
    async fn find_profile(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(profile)
    }

    async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>, AppError> {
        let role = sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(role)
    }
}
