// src/services/dashboard.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::{
        dashboard::{CategoryConsumption, DashboardSummary, ExitRecord},
        inventory::{AlertStatus, Product},
    },
    services::status::{classify_stock, expiry_ranking},
};

pub const EXPIRY_LIST_LIMIT: usize = 5;
const UNKNOWN_CATEGORY: &str = "Outros";
const NO_DATA_LABEL: &str = "Sem dados";

/// Monta o painel a partir das linhas já buscadas. `exits` deve cobrir ao
/// menos os últimos 7 dias.
pub fn summarize(products: &[Product], exits: &[ExitRecord], now: DateTime<Utc>) -> DashboardSummary {
    let day_ago = now - Duration::hours(24);
    let week_ago = now - Duration::days(7);

    let stock_alerts = products
        .iter()
        .filter(|p| classify_stock(p.quantity, p.min_stock) == AlertStatus::Critical)
        .count();

    let exits_24h = exits
        .iter()
        .filter(|e| e.created_at > day_ago)
        .map(|e| e.quantity)
        .sum::<Decimal>();

    let mut by_category: BTreeMap<&str, Decimal> = BTreeMap::new();
    for exit in exits.iter().filter(|e| e.created_at > week_ago) {
        let category = exit.category.as_deref().unwrap_or(UNKNOWN_CATEGORY);
        *by_category.entry(category).or_default() += exit.quantity;
    }

    let mut consumption_by_category: Vec<CategoryConsumption> = by_category
        .into_iter()
        .map(|(name, value)| CategoryConsumption { name: name.to_string(), value })
        .collect();
    if consumption_by_category.is_empty() {
        consumption_by_category.push(CategoryConsumption {
            name: NO_DATA_LABEL.to_string(),
            value: Decimal::ZERO,
        });
    }

    DashboardSummary {
        total_items: products.len(),
        stock_alerts,
        exits_24h,
        consumption_by_category,
        expiring_soon: expiry_ranking(products, now, EXPIRY_LIST_LIMIT),
    }
}

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    pub async fn get_summary(&self, now: DateTime<Utc>) -> Result<DashboardSummary, AppError> {
        let products = self.repo.get_products().await?;
        let exits = self.repo.get_exits_since(now - Duration::days(7)).await?;
        Ok(summarize(&products, &exits, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use uuid::Uuid;

    fn product(qty: i64, min: i64, expiration: Option<NaiveDate>) -> Product {
        Product {
            id: Uuid::new_v4(),
            sku: Uuid::new_v4().to_string(),
            name: "Item".into(),
            category: "Papelaria".into(),
            unit: "un".into(),
            quantity: Decimal::from(qty),
            min_stock: Decimal::from(min),
            status: "ativo".into(),
            expiration_date: expiration,
            created_at: Utc::now(),
        }
    }

    fn exit(qty: i64, category: Option<&str>, at: DateTime<Utc>) -> ExitRecord {
        ExitRecord { quantity: Decimal::from(qty), category: category.map(str::to_string), created_at: at }
    }

    #[test]
    fn counts_alerts_and_recent_exits() {
        let now = Utc.with_ymd_and_hms(2025, 5, 20, 12, 0, 0).unwrap();
        let products = vec![
            product(5, 5, None),
            product(3, 10, NaiveDate::from_ymd_opt(2025, 5, 22)),
            product(40, 5, None),
        ];
        let exits = vec![
            exit(2, Some("Papelaria"), now - Duration::hours(2)),
            exit(3, None, now - Duration::hours(30)),
            exit(4, Some("Papelaria"), now - Duration::days(3)),
        ];

        let summary = summarize(&products, &exits, now);
        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.stock_alerts, 2);
        assert_eq!(summary.exits_24h, Decimal::from(2));
        assert_eq!(
            summary.consumption_by_category,
            vec![
                CategoryConsumption { name: "Outros".into(), value: Decimal::from(3) },
                CategoryConsumption { name: "Papelaria".into(), value: Decimal::from(6) },
            ]
        );
        assert_eq!(summary.expiring_soon.len(), 1);
        assert_eq!(summary.expiring_soon[0].status, AlertStatus::Critical);
    }

    #[test]
    fn empty_week_shows_placeholder_bar() {
        let summary = summarize(&[], &[], Utc::now());
        assert_eq!(summary.total_items, 0);
        assert_eq!(summary.exits_24h, Decimal::ZERO);
        assert_eq!(
            summary.consumption_by_category,
            vec![CategoryConsumption { name: "Sem dados".into(), value: Decimal::ZERO }]
        );
    }
}
