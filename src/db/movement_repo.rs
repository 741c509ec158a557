// src/db/movement_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::inventory::{Movement, MovementReportRow, MovementType, NewMovement},
};

// Livro de movimentações: só INSERT e SELECT.
#[derive(Clone)]
pub struct MovementRepository {
    pool: PgPool,
}

impl MovementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Grava a movimentação. O saldo do produto não é tocado aqui.
    pub async fn insert(&self, movement: &NewMovement) -> Result<Movement, AppError> {
        let movement = sqlx::query_as::<_, Movement>(
            r#"
            INSERT INTO movements (type, quantity, description, product_id, responsible_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(movement.movement_type)
        .bind(movement.quantity)
        .bind(&movement.description)
        .bind(movement.product_id)
        .bind(movement.responsible_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(movement)
    }

    /// Movimentações com os campos do produto, mais recentes primeiro.
    pub async fn list_with_products(
        &self,
        movement_type: Option<MovementType>,
    ) -> Result<Vec<MovementReportRow>, AppError> {
        let rows = sqlx::query_as::<_, MovementReportRow>(
            r#"
            SELECT
                m.id,
                m.type,
                m.quantity,
                m.description,
                m.product_id,
                m.responsible_id,
                m.created_at,
                p.name AS product_name,
                p.unit AS product_unit,
                p.category AS product_category,
                p.sku AS product_sku,
                p.quantity AS product_quantity
            FROM movements m
            LEFT JOIN products p ON p.id = m.product_id
            WHERE ($1::movement_type IS NULL OR m.type = $1)
            ORDER BY m.created_at DESC
            "#,
        )
        .bind(movement_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
