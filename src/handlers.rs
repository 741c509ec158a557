pub mod access;
pub mod auth;
pub mod dashboard;
pub mod inventory;
pub mod movements;
pub mod products;
pub mod reports;
pub mod suppliers;
