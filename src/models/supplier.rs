// src/models/supplier.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Categorias sugeridas no cadastro de fornecedores.
pub const SUPPLIER_CATEGORIES: [&str; 5] = [
    "Informática",
    "Papelaria",
    "Limpeza",
    "Alimentos",
    "Esportes",
];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: Uuid,
    #[schema(example = "Distribuidora Central")]
    pub name: String,
    #[schema(example = "12.345.678/0001-90")]
    pub cnpj: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub contact_name: String,
    #[schema(example = json!(["Papelaria", "Limpeza"]))]
    pub categories: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPayload {
    #[validate(length(min = 1, message = "Por favor, preencha o nome do fornecedor."))]
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cnpj: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub contact_name: String,
    #[serde(default)]
    pub categories: Vec<String>,
}
