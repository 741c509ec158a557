// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,
        handlers::access::my_permissions,
        handlers::access::navigate,

        // --- Admin ---
        handlers::access::list_screens,
        handlers::access::list_profiles,
        handlers::access::update_profile_role,
        handlers::access::delete_profile,
        handlers::access::list_roles,
        handlers::access::create_role,
        handlers::access::update_role,

        // --- Products ---
        handlers::products::list_products,
        handlers::products::list_categories,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,

        // --- Inventory ---
        handlers::inventory::get_inventory,

        // --- Movements ---
        handlers::movements::register_entry,
        handlers::movements::register_exit,

        // --- Reports ---
        handlers::reports::list_movements,
        handlers::reports::export_movements_pdf,

        // --- Dashboard ---
        handlers::dashboard::get_summary,

        // --- Suppliers ---
        handlers::suppliers::list_suppliers,
        handlers::suppliers::list_categories,
        handlers::suppliers::create_supplier,
        handlers::suppliers::update_supplier,
        handlers::suppliers::delete_supplier,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::auth::MeResponse,

            // --- Access ---
            models::access::Screen,
            models::access::PermissionSet,
            models::access::Profile,
            models::access::Role,
            models::access::ScreenInfo,
            models::access::RolePayload,
            models::access::UpdateProfileRolePayload,
            models::access::NavigationResponse,

            // --- Inventory ---
            models::inventory::AlertStatus,
            models::inventory::Product,
            models::inventory::ProductPayload,
            models::inventory::InventoryEntry,
            models::inventory::Movement,
            models::inventory::EntryPayload,
            models::inventory::ExitPayload,
            models::inventory::ProductSummary,
            models::inventory::MovementWithProduct,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,
            models::dashboard::CategoryConsumption,
            models::dashboard::ExpiryItem,

            // --- Suppliers ---
            models::supplier::Supplier,
            models::supplier::SupplierPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Sessão, Permissões e Navegação"),
        (name = "Admin", description = "Usuários e Perfis de Acesso"),
        (name = "Products", description = "Cadastro de Produtos"),
        (name = "Inventory", description = "Níveis de Estoque"),
        (name = "Movements", description = "Entradas e Saídas"),
        (name = "Reports", description = "Relatório de Movimentações"),
        (name = "Dashboard", description = "Indicadores do Almoxarifado"),
        (name = "Suppliers", description = "Cadastro de Fornecedores")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_protected_route_declares_bearer_auth() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("api_jwt"));

        assert!(doc.paths.paths.contains_key("/api/movements/exits"));
        assert!(doc.paths.paths.contains_key("/api/reports/movements.pdf"));
        assert!(doc.paths.paths.contains_key("/api/admin/roles/{id}"));
        assert!(doc.paths.paths.contains_key("/api/users/me/navigation"));
    }
}
