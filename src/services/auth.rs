// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AccessRepository, UserRepository},
    models::{
        access::{PermissionSet, Profile, ADMIN_ROLE, DEFAULT_PROFILE_ROLE},
        auth::{AuthResponse, Claims, MeResponse, User},
    },
    services::access::PermissionResolver,
};

const TOKEN_TTL_DAYS: i64 = 7;

/// Cargo do perfil criado no cadastro. O e-mail configurado em `ADMIN_EMAIL`
/// nasce administrador; os demais recebem o cargo padrão.
pub fn initial_role(email: &str, admin_email: Option<&str>) -> &'static str {
    match admin_email {
        Some(admin) if admin.trim().eq_ignore_ascii_case(email.trim()) => ADMIN_ROLE,
        _ => DEFAULT_PROFILE_ROLE,
    }
}

/// Sem perfil, o cabeçalho mostra o cargo padrão e nenhum nome.
pub fn me_response(user: User, profile: Option<Profile>, permissions: PermissionSet) -> MeResponse {
    let (name, role) = match profile {
        Some(p) => (Some(p.name), p.role),
        None => (None, DEFAULT_PROFILE_ROLE.to_string()),
    };

    MeResponse { user, name, role, permissions }
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    access_repo: AccessRepository,
    resolver: PermissionResolver,
    jwt_secret: String,
    pool: PgPool,
    admin_email: Option<String>,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        access_repo: AccessRepository,
        resolver: PermissionResolver,
        jwt_secret: String,
        pool: PgPool,
    ) -> Self {
        Self { user_repo, access_repo, resolver, jwt_secret, pool, admin_email: None }
    }

    pub fn with_admin_email(mut self, admin_email: Option<String>) -> Self {
        self.admin_email = admin_email;
        self
    }

    pub async fn register_user(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<AuthResponse, AppError> {
        // Hashing fora da transação: não toca no banco
        let password_clone = password.to_owned();
        let hashed_password = tokio::task::spawn_blocking(move || {
            hash(&password_clone, bcrypt::DEFAULT_COST)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        // Identidade + perfil na mesma transação
        let mut tx = self.pool.begin().await?;

        let new_user = self.user_repo
            .create_user(&mut *tx, email, &hashed_password)
            .await?;

        let display_name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| new_user.email_local_part())
            .to_string();

        let role = initial_role(&new_user.email, self.admin_email.as_deref());
        self.access_repo
            .create_profile(&mut *tx, new_user.id, &display_name, &new_user.email, role)
            .await?;

        tx.commit().await?;

        tracing::info!("👤 Usuário {} cadastrado com cargo '{}'", new_user.id, role);
        self.session_for(new_user.id).await
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        let user = self.user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // bcrypt é CPU-bound: roda fora do executor assíncrono
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.session_for(user.id).await
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    /// Dados do cabeçalho: nome e cargo do perfil + as telas já resolvidas
    /// pelo `auth_guard` nesta requisição.
    pub async fn describe(&self, user: User, permissions: PermissionSet) -> MeResponse {
        let profile = self.resolver.find_profile(user.id).await.unwrap_or_else(|e| {
            tracing::warn!("Perfil de {} indisponível: {}", user.id, e);
            None
        });
        me_response(user, profile, permissions)
    }

    // Cada login/cadastro é uma mudança de sessão: resolve as telas de novo
    async fn session_for(&self, user_id: Uuid) -> Result<AuthResponse, AppError> {
        let token = self.create_token(user_id)?;
        let permissions = self.resolver.resolve(user_id).await;
        Ok(AuthResponse { token, permissions })
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(TOKEN_TTL_DAYS);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
