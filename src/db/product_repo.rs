// src/db/product_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::is_unique_violation,
    models::inventory::{Product, ProductFields},
};

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Leitura
    // ---

    /// Catálogo, mais recentes primeiro.
    pub async fn list_recent(&self) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    /// Monitoramento de estoque: ordem alfabética, filtro opcional de categoria.
    pub async fn list_by_name(&self, category: Option<&str>) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE ($1::text IS NULL OR category = $1)
            ORDER BY name ASC
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    pub async fn list_categories(&self) -> Result<Vec<String>, AppError> {
        let categories = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT category FROM products ORDER BY category ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    // ---
    // Escrita
    // ---

    pub async fn create(&self, fields: &ProductFields) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (sku, name, category, unit, min_stock, quantity, expiration_date)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, 0), $7)
            RETURNING *
            "#,
        )
        .bind(&fields.sku)
        .bind(&fields.name)
        .bind(&fields.category)
        .bind(&fields.unit)
        .bind(fields.min_stock)
        .bind(fields.quantity)
        .bind(fields.expiration_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::SkuAlreadyExists;
            }
            e.into()
        })
    }

    // O saldo só muda quando a contagem física vem no payload
    pub async fn update(&self, id: Uuid, fields: &ProductFields) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET sku = $2,
                name = $3,
                category = $4,
                unit = $5,
                min_stock = $6,
                quantity = COALESCE($7, quantity),
                expiration_date = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&fields.sku)
        .bind(&fields.name)
        .bind(&fields.category)
        .bind(&fields.unit)
        .bind(fields.min_stock)
        .bind(fields.quantity)
        .bind(fields.expiration_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::SkuAlreadyExists;
            }
            AppError::from(e)
        })?
        .ok_or(AppError::NotFound("Produto não encontrado."))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Produto não encontrado."));
        }
        Ok(())
    }
}
