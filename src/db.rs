pub mod user_repo;
pub use user_repo::UserRepository;
pub mod access_repo;
pub use access_repo::{AccessRepository, AccessStore};
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod movement_repo;
pub use movement_repo::MovementRepository;
pub mod supplier_repo;
pub use supplier_repo::SupplierRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;

/// Violação de UNIQUE vinda do Postgres?
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
