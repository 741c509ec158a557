// src/db/dashboard_repo.rs

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::{dashboard::ExitRecord, inventory::Product},
};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // 1. Todos os produtos (contagem, alertas e validade saem daqui)
    pub async fn get_products(&self) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>("SELECT * FROM products")
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    // 2. Saídas desde `since`, com a categoria do produto
    pub async fn get_exits_since(&self, since: DateTime<Utc>) -> Result<Vec<ExitRecord>, AppError> {
        let exits = sqlx::query_as::<_, ExitRecord>(
            r#"
            SELECT m.quantity, p.category, m.created_at
            FROM movements m
            LEFT JOIN products p ON p.id = m.product_id
            WHERE m.type = 'out'
              AND m.created_at > $1
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;
        Ok(exits)
    }
}
