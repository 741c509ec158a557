// src/lib.rs

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use utoipa::OpenApi;

use crate::{config::AppState, docs::ApiDoc, middleware::auth::auth_guard};

/// Monta o roteador completo. Tudo fora de `/api/auth` e da documentação
/// passa pelo `auth_guard`; o bloqueio por tela fica em cada handler.
pub fn app(app_state: AppState) -> Router {
    // Rotas públicas
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route("/me/permissions", get(handlers::access::my_permissions))
        .route("/me/navigation", get(handlers::access::navigate));

    let admin_routes = Router::new()
        .route("/screens", get(handlers::access::list_screens))
        .route("/profiles", get(handlers::access::list_profiles))
        .route("/profiles/{id}", delete(handlers::access::delete_profile))
        .route("/profiles/{id}/role", patch(handlers::access::update_profile_role))
        .route(
            "/roles",
            get(handlers::access::list_roles).post(handlers::access::create_role),
        )
        .route("/roles/{id}", put(handlers::access::update_role));

    let product_routes = Router::new()
        .route(
            "/",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route("/categories", get(handlers::products::list_categories))
        .route(
            "/{id}",
            put(handlers::products::update_product).delete(handlers::products::delete_product),
        );

    let movement_routes = Router::new()
        .route("/entries", post(handlers::movements::register_entry))
        .route("/exits", post(handlers::movements::register_exit));

    let supplier_routes = Router::new()
        .route(
            "/",
            get(handlers::suppliers::list_suppliers).post(handlers::suppliers::create_supplier),
        )
        .route("/categories", get(handlers::suppliers::list_categories))
        .route(
            "/{id}",
            put(handlers::suppliers::update_supplier).delete(handlers::suppliers::delete_supplier),
        );

    let protected = Router::new()
        .nest("/users", user_routes)
        .nest("/admin", admin_routes)
        .nest("/products", product_routes)
        .route("/inventory", get(handlers::inventory::get_inventory))
        .nest("/movements", movement_routes)
        .route("/reports/movements", get(handlers::reports::list_movements))
        .route("/reports/movements.pdf", get(handlers::reports::export_movements_pdf))
        .route("/dashboard", get(handlers::dashboard::get_summary))
        .nest("/suppliers", supplier_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/api/auth", auth_routes)
        .nest("/api", protected)
        .with_state(app_state)
}
