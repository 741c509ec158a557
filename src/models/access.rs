// src/models/access.rs

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Cargo sentinela: enxerga todas as telas, exista ou não a linha em `roles`.
pub const ADMIN_ROLE: &str = "Administrador";

/// Rótulo exibido quando a identidade ainda não tem perfil.
pub const DEFAULT_PROFILE_ROLE: &str = "Usuário";

// --- Telas (tokens de permissão) ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Dashboard,
    Inventory,
    Products,
    Entries,
    Exits,
    Reports,
    Admin,
    Suppliers,
}

impl Screen {
    /// Ordem de navegação.
    pub const ALL: [Screen; 8] = [
        Screen::Dashboard,
        Screen::Inventory,
        Screen::Products,
        Screen::Entries,
        Screen::Exits,
        Screen::Reports,
        Screen::Admin,
        Screen::Suppliers,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Screen::Dashboard => "dashboard",
            Screen::Inventory => "inventory",
            Screen::Products => "products",
            Screen::Entries => "entries",
            Screen::Exits => "exits",
            Screen::Reports => "reports",
            Screen::Admin => "admin",
            Screen::Suppliers => "suppliers",
        }
    }

    pub fn from_id(id: &str) -> Option<Screen> {
        Screen::ALL.into_iter().find(|s| s.id() == id)
    }

    pub fn label(self) -> &'static str {
        match self {
            Screen::Dashboard => "Painel Principal",
            Screen::Inventory => "Estoque",
            Screen::Products => "Produtos",
            Screen::Entries => "Entradas",
            Screen::Exits => "Saídas",
            Screen::Reports => "Relatórios",
            Screen::Admin => "Administração",
            Screen::Suppliers => "Fornecedores",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Screen::Dashboard => "Visualizar status geral do inventário e alertas.",
            Screen::Inventory => "Monitorar níveis, validades e status dos itens.",
            Screen::Products => "Cadastrar e editar o catálogo de produtos.",
            Screen::Entries => "Registrar novos itens e chegada de estoque.",
            Screen::Exits => "Processar retiradas e distribuição de itens.",
            Screen::Reports => "Gerar auditorias e exportar planilhas de dados.",
            Screen::Admin => "Gerenciar usuários, funções e config. do sistema.",
            Screen::Suppliers => "Gerenciar fornecedores e suas categorias.",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// --- Conjunto de permissões resolvido ---
// Os tokens são guardados exatamente como vieram do cargo (ordem e tokens
// desconhecidos inclusos); só os que batem com uma tela têm efeito.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Vec<String>, example = json!(["dashboard", "inventory"]))]
pub struct PermissionSet(Vec<String>);

impl PermissionSet {
    /// Sem sessão: nenhuma tela.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Conjunto mínimo concedido quando a resolução falha.
    pub fn minimal() -> Self {
        Self(vec![Screen::Dashboard.id().to_string()])
    }

    pub fn full() -> Self {
        Self(Screen::ALL.iter().map(|s| s.id().to_string()).collect())
    }

    pub fn from_tokens(tokens: Vec<String>) -> Self {
        Self(tokens)
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn allows(&self, screen: Screen) -> bool {
        self.0.iter().any(|t| t == screen.id())
    }

    /// Telas conhecidas, na ordem em que aparecem no cargo.
    pub fn screens(&self) -> impl Iterator<Item = Screen> + '_ {
        self.0.iter().filter_map(|t| Screen::from_id(t))
    }

    pub fn landing_screen(&self) -> Screen {
        self.screens().next().unwrap_or(Screen::Dashboard)
    }

    /// Tela efetivamente exibida ao pedir `requested`.
    pub fn navigate(&self, requested: Screen) -> Screen {
        if self.allows(requested) {
            requested
        } else {
            self.landing_screen()
        }
    }
}

// --- Perfil (um por identidade) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    #[schema(example = "Maria Souza")]
    pub name: String,
    pub email: String,
    #[schema(example = "Gestor de Estoque")]
    pub role: String,
    #[schema(example = "ativo")]
    pub status: String,
    pub created_at: DateTime<Utc>,
}

// --- Cargo ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: Uuid,
    #[schema(example = "Gestor de Estoque")]
    pub name: String,
    pub description: String,
    #[schema(example = json!(["dashboard", "inventory"]))]
    pub permissions: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScreenInfo {
    pub id: Screen,
    pub label: &'static str,
    pub description: &'static str,
}

impl From<Screen> for ScreenInfo {
    fn from(screen: Screen) -> Self {
        Self {
            id: screen,
            label: screen.label(),
            description: screen.description(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RolePayload {
    #[validate(length(min = 1, message = "O nome do perfil é obrigatório."))]
    #[serde(default)]
    #[schema(example = "Auxiliar de Estoque")]
    pub name: String,

    #[schema(example = json!(["dashboard", "entries"]))]
    #[serde(default)]
    pub permissions: Vec<String>,

    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRolePayload {
    #[validate(length(min = 1, message = "O cargo é obrigatório."))]
    #[schema(example = "Gestor de Estoque")]
    pub role: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NavigationQuery {
    /// Id da tela pedida (ex.: `reports`)
    pub view: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavigationResponse {
    pub requested: Screen,
    pub screen: Screen,
    pub redirected: bool,
    pub permissions: PermissionSet,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn set(tokens: &[&str]) -> PermissionSet {
        PermissionSet::from_tokens(tokens.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn screen_ids_round_trip() {
        for screen in Screen::ALL {
            assert_eq!(Screen::from_id(screen.id()), Some(screen));
        }
        assert_eq!(Screen::from_id("inventory_p"), None);
    }

    #[test]
    fn navigation_redirects_to_first_permitted_screen() {
        let perms = set(&["dashboard", "inventory"]);
        assert_eq!(perms.navigate(Screen::Inventory), Screen::Inventory);
        assert_eq!(perms.navigate(Screen::Reports), Screen::Dashboard);

        let perms = set(&["exits", "entries"]);
        assert_eq!(perms.navigate(Screen::Admin), Screen::Exits);
    }

    #[test]
    fn unknown_tokens_are_kept_but_ignored() {
        let perms = set(&["Painel", "reports"]);
        assert_eq!(perms.tokens(), &["Painel".to_string(), "reports".to_string()]);
        assert_eq!(perms.landing_screen(), Screen::Reports);
        assert!(!perms.allows(Screen::Dashboard));
    }

    #[test]
    fn empty_set_lands_on_dashboard() {
        let perms = PermissionSet::empty();
        assert!(perms.is_empty());
        assert_eq!(perms.navigate(Screen::Products), Screen::Dashboard);
    }

    #[test]
    fn full_set_covers_every_screen() {
        let perms = PermissionSet::full();
        assert!(Screen::ALL.iter().all(|s| perms.allows(*s)));
        assert_eq!(perms.tokens().len(), Screen::ALL.len());
    }

    #[test]
    fn permission_set_serializes_as_plain_array() {
        let json = serde_json::to_value(PermissionSet::minimal()).unwrap();
        assert_eq!(json, json!(["dashboard"]));
    }
}
