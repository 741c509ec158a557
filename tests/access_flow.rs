//! Resolução de permissões e navegação entre telas, de ponta a ponta,
//! sobre um armazenamento em memória.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use edu_estoque::{
    common::error::AppError,
    db::AccessStore,
    models::access::{PermissionSet, Profile, Role, Screen},
    services::access::PermissionResolver,
};

#[derive(Default)]
struct InMemoryAccess {
    profiles: HashMap<Uuid, Profile>,
    roles: HashMap<String, Role>,
    offline: AtomicBool,
}

impl InMemoryAccess {
    fn profile(mut self, id: Uuid, role: &str) -> Self {
        self.profiles.insert(
            id,
            Profile {
                id,
                name: "Ana".into(),
                email: "ana@escola.br".into(),
                role: role.into(),
                status: "ativo".into(),
                created_at: Utc::now(),
            },
        );
        self
    }

    fn role(mut self, name: &str, permissions: &[&str]) -> Self {
        self.roles.insert(
            name.into(),
            Role {
                id: Uuid::new_v4(),
                name: name.into(),
                description: String::new(),
                permissions: permissions.iter().map(|p| p.to_string()).collect(),
                created_at: Utc::now(),
            },
        );
        self
    }
}

#[async_trait]
impl AccessStore for InMemoryAccess {
    async fn find_profile(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError(sqlx::Error::PoolClosed));
        }
        Ok(self.profiles.get(&user_id).cloned())
    }

    async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>, AppError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError(sqlx::Error::PoolClosed));
        }
        Ok(self.roles.get(name).cloned())
    }
}

#[tokio::test]
async fn stock_manager_is_redirected_away_from_reports() {
    let user = Uuid::new_v4();
    let store = InMemoryAccess::default()
        .profile(user, "Gestor de Estoque")
        .role(
            "Gestor de Estoque",
            &["dashboard", "inventory", "products", "entries", "exits"],
        );
    let resolver = PermissionResolver::new(Arc::new(store));

    let permissions = resolver.resolve(user).await;

    assert_eq!(
        permissions.tokens(),
        ["dashboard", "inventory", "products", "entries", "exits"]
    );
    assert_eq!(permissions.navigate(Screen::Exits), Screen::Exits);
    assert_eq!(permissions.navigate(Screen::Reports), Screen::Dashboard);
    assert_eq!(permissions.navigate(Screen::Admin), Screen::Dashboard);
}

#[tokio::test]
async fn role_list_is_returned_exactly() {
    let user = Uuid::new_v4();
    let store = InMemoryAccess::default()
        .profile(user, "Gestor de Estoque")
        .role("Gestor de Estoque", &["dashboard", "inventory"]);
    let resolver = PermissionResolver::new(Arc::new(store));

    let permissions = resolver.resolve(user).await;

    assert_eq!(permissions.tokens(), ["dashboard", "inventory"]);
    assert_eq!(permissions.navigate(Screen::Inventory), Screen::Inventory);
    assert_eq!(permissions.navigate(Screen::Reports), Screen::Dashboard);
}

#[tokio::test]
async fn administrator_sees_every_screen_without_a_role_row() {
    let user = Uuid::new_v4();
    let resolver = PermissionResolver::new(Arc::new(
        InMemoryAccess::default().profile(user, "Administrador"),
    ));

    let permissions = resolver.resolve(user).await;

    assert_eq!(permissions, PermissionSet::full());
    for screen in Screen::ALL {
        assert_eq!(permissions.navigate(screen), screen);
    }
}

#[tokio::test]
async fn role_missing_from_table_only_grants_the_dashboard() {
    let user = Uuid::new_v4();
    let resolver = PermissionResolver::new(Arc::new(
        InMemoryAccess::default().profile(user, "Estagiário"),
    ));

    let permissions = resolver.resolve(user).await;

    assert_eq!(permissions, PermissionSet::minimal());
    assert_eq!(permissions.navigate(Screen::Products), Screen::Dashboard);
}

#[tokio::test]
async fn store_outage_degrades_to_dashboard_only() {
    let user = Uuid::new_v4();
    let store = InMemoryAccess::default()
        .profile(user, "Gestor de Estoque")
        .role("Gestor de Estoque", &["inventory", "exits"]);
    store.offline.store(true, Ordering::SeqCst);
    let resolver = PermissionResolver::new(Arc::new(store));

    assert!(resolver.try_resolve(user).await.is_err());
    assert_eq!(resolver.resolve(user).await, PermissionSet::minimal());
}

#[tokio::test]
async fn landing_screen_follows_role_order() {
    let user = Uuid::new_v4();
    let store = InMemoryAccess::default()
        .profile(user, "Expedição")
        .role("Expedição", &["relatorio-antigo", "exits", "inventory"]);
    let resolver = PermissionResolver::new(Arc::new(store));

    let permissions = resolver.resolve(user).await;

    // token desconhecido é mantido, mas não abre tela nenhuma
    assert_eq!(permissions.tokens()[0], "relatorio-antigo");
    assert_eq!(permissions.landing_screen(), Screen::Exits);
    assert_eq!(permissions.navigate(Screen::Dashboard), Screen::Exits);
}
