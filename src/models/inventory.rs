// src/models/inventory.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Valor do filtro de categoria que significa "sem filtro".
pub const ALL_CATEGORIES: &str = "Todas as Categorias";

pub const DEFAULT_UNIT: &str = "Unidade (un)";
pub const DEFAULT_CATEGORY: &str = "Informática";
pub const ACTIVE_STATUS: &str = "ativo";

/// Normaliza o filtro de categoria vindo da query string.
pub fn category_filter(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
}

// --- Status derivado (estoque e validade) ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Critical,
    Warning,
    Normal,
}

// --- Produtos ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    #[schema(example = "PAP-0001")]
    pub sku: String,
    #[schema(example = "Caderno universitário")]
    pub name: String,
    #[schema(example = "Papelaria")]
    pub category: String,
    #[schema(example = "Unidade (un)")]
    pub unit: String,
    pub quantity: Decimal,
    pub min_stock: Decimal,
    pub status: String,
    pub expiration_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[validate(length(min = 1, message = "Por favor, preencha o nome e o SKU."))]
    #[serde(default)]
    pub name: String,

    #[validate(length(min = 1, message = "Por favor, preencha o nome e o SKU."))]
    #[serde(default)]
    pub sku: String,

    pub unit: Option<String>,
    pub category: Option<String>,
    pub min_stock: Option<Decimal>,

    /// Contagem física (inventário). Ausente mantém o saldo atual.
    pub quantity: Option<Decimal>,

    pub expiration_date: Option<NaiveDate>,
}

/// Linha pronta para INSERT/UPDATE, já com os valores padrão aplicados.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub sku: String,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub min_stock: Decimal,
    pub quantity: Option<Decimal>,
    pub expiration_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InventoryQuery {
    /// Categoria exata; "Todas as Categorias" ou ausente não filtra
    pub category: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryEntry {
    #[serde(flatten)]
    pub product: Product,
    pub stock_status: AlertStatus,
}

// --- Movimentações ---
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "movement_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    In,
    Out,
}

impl MovementType {
    pub fn label(self) -> &'static str {
        match self {
            MovementType::In => "Entrada",
            MovementType::Out => "Saída",
        }
    }

    /// Aceita os valores da API e os rótulos da tela de relatórios.
    /// `None` significa "Todos".
    pub fn parse_filter(raw: Option<&str>) -> Result<Option<MovementType>, String> {
        let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
            return Ok(None);
        };
        match raw.to_lowercase().as_str() {
            "todos" | "all" => Ok(None),
            "in" | "entrada" => Ok(Some(MovementType::In)),
            "out" | "saída" | "saida" => Ok(Some(MovementType::Out)),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub id: Uuid,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub quantity: Decimal,
    pub description: String,
    pub product_id: Option<Uuid>,
    pub responsible_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMovement {
    pub movement_type: MovementType,
    pub product_id: Uuid,
    pub quantity: Decimal,
    pub description: String,
    pub responsible_id: Uuid,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryPayload {
    #[validate(required(message = "Por favor, selecione um produto e informe a quantidade."))]
    pub product_id: Option<Uuid>,

    #[validate(required(message = "Por favor, selecione um produto e informe a quantidade."))]
    pub quantity: Option<Decimal>,

    /// Lote ou nota fiscal
    pub lot_number: Option<String>,
    pub source: Option<String>,
    pub entry_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExitPayload {
    #[validate(required(message = "Por favor, selecione um produto e informe a quantidade."))]
    pub product_id: Option<Uuid>,

    #[validate(required(message = "Por favor, selecione um produto e informe a quantidade."))]
    pub quantity: Option<Decimal>,

    pub destination: Option<String>,
    pub responsible: Option<String>,
    pub observation: Option<String>,
}

// Linha do JOIN movements x products usada nos relatórios
#[derive(Debug, Clone, FromRow)]
pub struct MovementReportRow {
    pub id: Uuid,
    #[sqlx(rename = "type")]
    pub movement_type: MovementType,
    pub quantity: Decimal,
    pub description: String,
    pub product_id: Option<Uuid>,
    pub responsible_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub product_name: Option<String>,
    pub product_unit: Option<String>,
    pub product_category: Option<String>,
    pub product_sku: Option<String>,
    pub product_quantity: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub name: String,
    pub unit: String,
    pub category: String,
    pub sku: String,
    pub quantity: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovementWithProduct {
    #[serde(flatten)]
    pub movement: Movement,
    /// Ausente quando o produto foi excluído
    pub product: Option<ProductSummary>,
}

impl From<MovementReportRow> for MovementWithProduct {
    fn from(row: MovementReportRow) -> Self {
        let product = match (row.product_name, row.product_sku) {
            (Some(name), Some(sku)) => Some(ProductSummary {
                name,
                sku,
                unit: row.product_unit.unwrap_or_default(),
                category: row.product_category.unwrap_or_default(),
                quantity: row.product_quantity.unwrap_or_default(),
            }),
            _ => None,
        };

        Self {
            movement: Movement {
                id: row.id,
                movement_type: row.movement_type,
                quantity: row.quantity,
                description: row.description,
                product_id: row.product_id,
                responsible_id: row.responsible_id,
                created_at: row.created_at,
            },
            product,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// `in`/`entrada`, `out`/`saída` ou `Todos`
    #[serde(rename = "type")]
    pub movement_type: Option<String>,
    pub category: Option<String>,
}
