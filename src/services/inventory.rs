// src/services/inventory.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{MovementRepository, ProductRepository},
    models::inventory::{
        category_filter, EntryPayload, ExitPayload, InventoryEntry, Movement, MovementType,
        NewMovement, Product, ProductFields, ProductPayload, ACTIVE_STATUS, DEFAULT_CATEGORY,
        DEFAULT_UNIT,
    },
    services::status::classify_stock,
};

const MISSING_PRODUCT_OR_QUANTITY: &str = "Por favor, selecione um produto e informe a quantidade.";
const MISSING_NAME_OR_SKU: &str = "Por favor, preencha o nome e o SKU.";

/// Casas decimais das colunas NUMERIC(14, 3).
pub const QUANTITY_SCALE: u32 = 3;

// ---
// Regras puras (validação e montagem de linhas)
// ---

fn validate_not_negative(field: &'static str, value: Option<Decimal>) -> Result<(), AppError> {
    match value {
        Some(v) if v.is_sign_negative() && !v.is_zero() => {
            Err(AppError::field(field, "range", "O valor não pode ser negativo."))
        }
        _ => Ok(()),
    }
}

fn validate_scale(field: &'static str, value: Option<Decimal>) -> Result<(), AppError> {
    match value {
        Some(v) if v.normalize().scale() > QUANTITY_SCALE => Err(AppError::field(
            field,
            "scale",
            "Use no máximo 3 casas decimais.",
        )),
        _ => Ok(()),
    }
}

/// Aplica os valores padrão do cadastro de produtos.
pub fn product_fields(payload: ProductPayload) -> Result<ProductFields, AppError> {
    validate_not_negative("minStock", payload.min_stock)?;
    validate_not_negative("quantity", payload.quantity)?;
    validate_scale("minStock", payload.min_stock)?;
    validate_scale("quantity", payload.quantity)?;

    let sku = payload.sku.trim().to_string();
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::field("name", "required", MISSING_NAME_OR_SKU));
    }
    if sku.is_empty() {
        return Err(AppError::field("sku", "required", MISSING_NAME_OR_SKU));
    }

    let non_blank = |value: Option<String>, default: &str| {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    Ok(ProductFields {
        sku,
        name,
        category: non_blank(payload.category, DEFAULT_CATEGORY),
        unit: non_blank(payload.unit, DEFAULT_UNIT),
        min_stock: payload.min_stock.unwrap_or(Decimal::ZERO),
        quantity: payload.quantity,
        expiration_date: payload.expiration_date,
    })
}

/// Produto e quantidade positiva são obrigatórios nas duas telas.
pub fn require_product_and_quantity(
    product_id: Option<Uuid>,
    quantity: Option<Decimal>,
) -> Result<(Uuid, Decimal), AppError> {
    validate_scale("quantity", quantity)?;

    match (product_id, quantity) {
        (Some(id), Some(qty)) if qty > Decimal::ZERO => Ok((id, qty)),
        (_, Some(qty)) if qty <= Decimal::ZERO => Err(AppError::field(
            "quantity",
            "range",
            "A quantidade deve ser maior que zero.",
        )),
        _ => Err(AppError::field("productId", "required", MISSING_PRODUCT_OR_QUANTITY)),
    }
}

/// Entradas e saídas só valem para produtos cadastrados.
pub fn require_existing_product(found: Option<Product>) -> Result<Product, AppError> {
    found.ok_or(AppError::NotFound("Produto não encontrado."))
}

/// A saída não pode passar do saldo conhecido no momento da checagem.
/// A checagem não trava a linha: duas saídas simultâneas podem passar.
pub fn check_exit_quantity(product: &Product, quantity: Decimal) -> Result<(), AppError> {
    if quantity > product.quantity {
        return Err(AppError::InsufficientStock {
            available: product.quantity.normalize(),
            unit: product.unit.clone(),
        });
    }
    Ok(())
}

fn or_na(value: Option<&str>) -> &str {
    value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or("N/A")
}

pub fn entry_description(lot_number: Option<&str>, source: Option<&str>, date: NaiveDate) -> String {
    format!(
        "Entrada - Lote/NF: {} - Origem: {} - Data: {}",
        or_na(lot_number),
        or_na(source),
        date.format("%Y-%m-%d")
    )
}

pub fn exit_description(
    destination: Option<&str>,
    responsible: Option<&str>,
    observation: Option<&str>,
) -> String {
    format!(
        "Saída - Destino: {} - Responsável: {} - Obs: {}",
        destination.unwrap_or_default().trim(),
        responsible.unwrap_or_default().trim(),
        observation.unwrap_or_default().trim()
    )
}

// ---
// Serviço
// ---
#[derive(Clone)]
pub struct InventoryService {
    product_repo: ProductRepository,
    movement_repo: MovementRepository,
}

impl InventoryService {
    pub fn new(product_repo: ProductRepository, movement_repo: MovementRepository) -> Self {
        Self { product_repo, movement_repo }
    }

    // --- Produtos ---

    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        self.product_repo.list_recent().await
    }

    pub async fn list_categories(&self) -> Result<Vec<String>, AppError> {
        self.product_repo.list_categories().await
    }

    pub async fn create_product(&self, payload: ProductPayload) -> Result<Product, AppError> {
        let fields = product_fields(payload)?;
        let product = self.product_repo.create(&fields).await?;
        tracing::info!("📦 Produto {} ({}) cadastrado com status '{}'", product.sku, product.id, ACTIVE_STATUS);
        Ok(product)
    }

    pub async fn update_product(&self, id: Uuid, payload: ProductPayload) -> Result<Product, AppError> {
        let fields = product_fields(payload)?;
        self.product_repo.update(id, &fields).await
    }

    pub async fn delete_product(&self, id: Uuid) -> Result<(), AppError> {
        self.product_repo.delete(id).await?;
        tracing::info!("Produto {} excluído", id);
        Ok(())
    }

    // --- Monitoramento ---

    pub async fn inventory(&self, category: Option<&str>) -> Result<Vec<InventoryEntry>, AppError> {
        let products = self.product_repo.list_by_name(category_filter(category)).await?;

        Ok(products
            .into_iter()
            .map(|product| InventoryEntry {
                stock_status: classify_stock(product.quantity, product.min_stock),
                product,
            })
            .collect())
    }

    // --- Movimentações ---

    pub async fn register_entry(
        &self,
        responsible_id: Uuid,
        payload: EntryPayload,
        today: NaiveDate,
    ) -> Result<Movement, AppError> {
        let (product_id, quantity) = require_product_and_quantity(payload.product_id, payload.quantity)?;
        let product = require_existing_product(self.product_repo.find_by_id(product_id).await?)?;

        let description = entry_description(
            payload.lot_number.as_deref(),
            payload.source.as_deref(),
            payload.entry_date.unwrap_or(today),
        );

        let movement = self.movement_repo
            .insert(&NewMovement {
                movement_type: MovementType::In,
                product_id,
                quantity,
                description,
                responsible_id,
            })
            .await?;

        tracing::info!("⬆️ Entrada de {} {} no produto {}", quantity, product.unit, product.sku);
        Ok(movement)
    }

    pub async fn register_exit(
        &self,
        responsible_id: Uuid,
        payload: ExitPayload,
    ) -> Result<Movement, AppError> {
        let (product_id, quantity) = require_product_and_quantity(payload.product_id, payload.quantity)?;

        let product = require_existing_product(self.product_repo.find_by_id(product_id).await?)?;

        check_exit_quantity(&product, quantity)?;

        let description = exit_description(
            payload.destination.as_deref(),
            payload.responsible.as_deref(),
            payload.observation.as_deref(),
        );

        let movement = self.movement_repo
            .insert(&NewMovement {
                movement_type: MovementType::Out,
                product_id,
                quantity,
                description,
                responsible_id,
            })
            .await?;

        tracing::info!("⬇️ Saída de {} {} do produto {}", quantity, product.unit, product.sku);
        Ok(movement)
    }
}
