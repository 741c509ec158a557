// src/models/dashboard.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::inventory::AlertStatus;

// 1. Cards do topo + gráfico + validade
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_items: usize,
    pub stock_alerts: usize, // quantity <= min_stock
    #[serde(rename = "exits24h")]
    pub exits_24h: Decimal,
    pub consumption_by_category: Vec<CategoryConsumption>,
    pub expiring_soon: Vec<ExpiryItem>,
}

// 2. Consumo (saídas) por categoria nos últimos 7 dias
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CategoryConsumption {
    pub name: String,
    pub value: Decimal,
}

// 3. Itens com validade mais próxima
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryItem {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub quantity: Decimal,
    pub expiration_date: NaiveDate,
    pub days_left: i64,
    pub status: AlertStatus,
}

// Saída com a categoria do produto (LEFT JOIN)
#[derive(Debug, Clone, FromRow)]
pub struct ExitRecord {
    pub quantity: Decimal,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}
