// src/config.rs

use std::{env, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        AccessRepository, DashboardRepository, MovementRepository, ProductRepository,
        SupplierRepository, UserRepository,
    },
    services::{
        access::{AccessService, PermissionResolver},
        auth::AuthService,
        dashboard::DashboardService,
        inventory::InventoryService,
        reports::ReportService,
        suppliers::SupplierService,
    },
};

const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_FONTS_DIR: &str = "./fonts";

/// Variáveis de ambiente lidas na inicialização.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,
    pub max_connections: u32,
    /// E-mail que recebe o cargo "Administrador" ao se cadastrar
    pub admin_email: Option<String>,
    /// Pasta com as fontes TTF usadas no PDF de relatórios
    pub fonts_dir: PathBuf,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| DEFAULT_SERVER_ADDR.to_string());
        let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS inválido: {raw}"))?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        let admin_email = env::var("ADMIN_EMAIL")
            .ok()
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        let fonts_dir = env::var("REPORT_FONTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_FONTS_DIR));

        Ok(Self { database_url, jwt_secret, server_addr, max_connections, admin_email, fonts_dir })
    }
}

// Estado compartilhado por todos os handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub permission_resolver: PermissionResolver,
    pub access_service: AccessService,
    pub inventory_service: InventoryService,
    pub report_service: ReportService,
    pub dashboard_service: DashboardService,
    pub supplier_service: SupplierService,
}

impl AppState {
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&settings.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let mut state = Self::from_pool(db_pool, settings.jwt_secret.clone());
        state.auth_service = state.auth_service.with_admin_email(settings.admin_email.clone());
        state.report_service = state.report_service.with_fonts_dir(settings.fonts_dir.clone());
        Ok(state)
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_pool(db_pool: PgPool, jwt_secret: String) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let access_repo = AccessRepository::new(db_pool.clone());
        let product_repo = ProductRepository::new(db_pool.clone());
        let movement_repo = MovementRepository::new(db_pool.clone());

        let permission_resolver = PermissionResolver::new(Arc::new(access_repo.clone()));

        let auth_service = AuthService::new(
            user_repo,
            access_repo.clone(),
            permission_resolver.clone(),
            jwt_secret,
            db_pool.clone(),
        );

        Self {
            auth_service,
            permission_resolver,
            access_service: AccessService::new(access_repo),
            inventory_service: InventoryService::new(product_repo, movement_repo.clone()),
            report_service: ReportService::new(movement_repo),
            dashboard_service: DashboardService::new(DashboardRepository::new(db_pool.clone())),
            supplier_service: SupplierService::new(SupplierRepository::new(db_pool.clone())),
            db_pool,
        }
    }
}
