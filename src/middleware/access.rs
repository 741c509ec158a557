// src/middleware/access.rs

use std::marker::PhantomData;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    common::error::AppError,
    middleware::auth::AccessContext,
    models::access::Screen,
};

/// Tela que protege um handler.
pub trait ScreenDef: Send + Sync + 'static {
    fn screen() -> Screen;
}

/// Guardião: sem a tela no conjunto resolvido, responde 403 indicando para
/// onde o cliente deve ser redirecionado.
pub struct RequireScreen<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireScreen<T>
where
    T: ScreenDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = parts
            .extensions
            .get::<AccessContext>()
            .ok_or(AppError::InvalidToken)?;

        let screen = T::screen();
        if !ctx.permissions.allows(screen) {
            return Err(AppError::ScreenForbidden {
                screen,
                redirect_to: ctx.permissions.navigate(screen),
            });
        }

        Ok(RequireScreen(PhantomData))
    }
}

macro_rules! screen_guard {
    ($name:ident, $screen:expr) => {
        pub struct $name;
        impl ScreenDef for $name {
            fn screen() -> Screen {
                $screen
            }
        }
    };
}

screen_guard!(DashboardScreen, Screen::Dashboard);
screen_guard!(InventoryScreen, Screen::Inventory);
screen_guard!(ProductsScreen, Screen::Products);
screen_guard!(EntriesScreen, Screen::Entries);
screen_guard!(ExitsScreen, Screen::Exits);
screen_guard!(ReportsScreen, Screen::Reports);
screen_guard!(AdminScreen, Screen::Admin);
screen_guard!(SuppliersScreen, Screen::Suppliers);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{access::PermissionSet, auth::User};
    use axum::http::Request;
    use chrono::Utc;
    use uuid::Uuid;

    fn parts_with(permissions: Option<PermissionSet>) -> Parts {
        let mut request = Request::builder().uri("/api/reports/movements").body(()).unwrap();
        if let Some(permissions) = permissions {
            let user = User {
                id: Uuid::new_v4(),
                email: "gestor@escola.br".into(),
                password_hash: String::new(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            request.extensions_mut().insert(AccessContext { user, permissions });
        }
        request.into_parts().0
    }

    fn stock_manager() -> PermissionSet {
        PermissionSet::from_tokens(vec!["dashboard".into(), "inventory".into()])
    }

    #[tokio::test]
    async fn permitted_screen_passes() {
        let mut parts = parts_with(Some(stock_manager()));
        let guard = RequireScreen::<InventoryScreen>::from_request_parts(&mut parts, &()).await;
        assert!(guard.is_ok());
    }

    #[tokio::test]
    async fn forbidden_screen_redirects_to_landing_screen() {
        let mut parts = parts_with(Some(stock_manager()));
        let err = RequireScreen::<ReportsScreen>::from_request_parts(&mut parts, &())
            .await
            .err()
            .unwrap();

        match err {
            AppError::ScreenForbidden { screen, redirect_to } => {
                assert_eq!(screen, Screen::Reports);
                assert_eq!(redirect_to, Screen::Dashboard);
            }
            other => panic!("erro inesperado: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_session_is_unauthorized() {
        let mut parts = parts_with(None);
        let err = RequireScreen::<DashboardScreen>::from_request_parts(&mut parts, &())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AppError::InvalidToken));
    }
}
