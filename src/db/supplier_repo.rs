// src/db/supplier_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::supplier::{Supplier, SupplierPayload},
};

#[derive(Clone)]
pub struct SupplierRepository {
    pool: PgPool,
}

impl SupplierRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Supplier>, AppError> {
        let suppliers = sqlx::query_as::<_, Supplier>("SELECT * FROM suppliers ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(suppliers)
    }

    pub async fn create(&self, data: &SupplierPayload) -> Result<Supplier, AppError> {
        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            INSERT INTO suppliers (name, cnpj, address, email, phone, contact_name, categories)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.cnpj)
        .bind(&data.address)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.contact_name)
        .bind(&data.categories)
        .fetch_one(&self.pool)
        .await?;

        Ok(supplier)
    }

    pub async fn update(&self, id: Uuid, data: &SupplierPayload) -> Result<Supplier, AppError> {
        sqlx::query_as::<_, Supplier>(
            r#"
            UPDATE suppliers
            SET name = $2, cnpj = $3, address = $4, email = $5,
                phone = $6, contact_name = $7, categories = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.cnpj)
        .bind(&data.address)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.contact_name)
        .bind(&data.categories)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Fornecedor não encontrado."))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Fornecedor não encontrado."));
        }
        Ok(())
    }
}
