// src/services/suppliers.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::SupplierRepository,
    models::supplier::{Supplier, SupplierPayload},
};

/// Remove espaços e tags repetidas, mantendo a ordem escolhida.
pub fn normalize_supplier(mut payload: SupplierPayload) -> SupplierPayload {
    payload.name = payload.name.trim().to_string();
    let mut categories: Vec<String> = Vec::with_capacity(payload.categories.len());
    for category in payload.categories.into_iter().map(|c| c.trim().to_string()) {
        if !category.is_empty() && !categories.contains(&category) {
            categories.push(category);
        }
    }
    payload.categories = categories;
    payload
}

#[derive(Clone)]
pub struct SupplierService {
    repo: SupplierRepository,
}

impl SupplierService {
    pub fn new(repo: SupplierRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Supplier>, AppError> {
        self.repo.list().await
    }

    pub async fn create(&self, payload: SupplierPayload) -> Result<Supplier, AppError> {
        let supplier = self.repo.create(&normalize_supplier(payload)).await?;
        tracing::info!("🚚 Fornecedor '{}' cadastrado", supplier.name);
        Ok(supplier)
    }

    pub async fn update(&self, id: Uuid, payload: SupplierPayload) -> Result<Supplier, AppError> {
        self.repo.update(id, &normalize_supplier(payload)).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_are_trimmed_and_deduplicated() {
        let payload = SupplierPayload {
            name: " Papelaria Central ".into(),
            cnpj: String::new(),
            address: String::new(),
            email: String::new(),
            phone: String::new(),
            contact_name: String::new(),
            categories: vec!["Papelaria".into(), " Limpeza".into(), "Papelaria".into(), "".into()],
        };

        let normalized = normalize_supplier(payload);
        assert_eq!(normalized.name, "Papelaria Central");
        assert_eq!(normalized.categories, vec!["Papelaria".to_string(), "Limpeza".to_string()]);
    }
}
