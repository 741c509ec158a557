// src/services/status.rs
//
// Derivação de status de estoque e de validade. Funções puras: mesma entrada,
// mesma saída.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;

use crate::models::{
    dashboard::ExpiryItem,
    inventory::{AlertStatus, Product},
};

/// Faixa de "atenção" acima do estoque mínimo.
pub const STOCK_WARNING_BAND: i64 = 10;

pub const EXPIRY_CRITICAL_DAYS: i64 = 7;
pub const EXPIRY_WARNING_DAYS: i64 = 15;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

pub fn classify_stock(quantity: Decimal, min_stock: Decimal) -> AlertStatus {
    if quantity <= min_stock {
        AlertStatus::Critical
    } else if quantity <= min_stock + Decimal::from(STOCK_WARNING_BAND) {
        AlertStatus::Warning
    } else {
        AlertStatus::Normal
    }
}

/// Dias inteiros até a validade (teto da fração exata). A data vale a partir
/// de 00:00 UTC.
pub fn days_until(expiration: NaiveDate, now: DateTime<Utc>) -> i64 {
    let expires_at = expiration.and_time(NaiveTime::MIN).and_utc();
    let millis = (expires_at - now).num_milliseconds();
    // teto de millis / MILLIS_PER_DAY, inclusive para valores negativos
    -((-millis).div_euclid(MILLIS_PER_DAY))
}

pub fn classify_expiry_days(diff_days: i64) -> AlertStatus {
    if diff_days <= EXPIRY_CRITICAL_DAYS {
        AlertStatus::Critical
    } else if diff_days <= EXPIRY_WARNING_DAYS {
        AlertStatus::Warning
    } else {
        AlertStatus::Normal
    }
}

pub fn classify_expiry(expiration: NaiveDate, now: DateTime<Utc>) -> AlertStatus {
    classify_expiry_days(days_until(expiration, now))
}

/// Produtos com validade, do vencimento mais próximo para o mais distante.
/// Produtos sem data de validade ficam de fora.
pub fn expiry_ranking(products: &[Product], now: DateTime<Utc>, limit: usize) -> Vec<ExpiryItem> {
    let mut items: Vec<ExpiryItem> = products
        .iter()
        .filter_map(|p| {
            let expiration = p.expiration_date?;
            let days_left = days_until(expiration, now);
            Some(ExpiryItem {
                id: p.id,
                name: p.name.clone(),
                category: p.category.clone(),
                quantity: p.quantity,
                expiration_date: expiration,
                days_left,
                status: classify_expiry_days(days_left),
            })
        })
        .collect();

    items.sort_by_key(|item| item.expiration_date);
    items.truncate(limit);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn product(name: &str, expiration: Option<NaiveDate>) -> Product {
        Product {
            id: Uuid::new_v4(),
            sku: format!("SKU-{name}"),
            name: name.to_string(),
            category: "Alimentos".to_string(),
            unit: "Unidade (un)".to_string(),
            quantity: Decimal::from(20),
            min_stock: Decimal::from(5),
            status: "ativo".to_string(),
            expiration_date: expiration,
            created_at: Utc::now(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn stock_boundaries() {
        let min = Decimal::from(5);
        assert_eq!(classify_stock(Decimal::from(5), min), AlertStatus::Critical);
        assert_eq!(classify_stock(Decimal::from(0), min), AlertStatus::Critical);
        assert_eq!(classify_stock(Decimal::from(12), min), AlertStatus::Warning);
        assert_eq!(classify_stock(Decimal::from(15), min), AlertStatus::Warning);
        assert_eq!(classify_stock(Decimal::from(16), min), AlertStatus::Normal);
        assert_eq!(classify_stock(Decimal::new(151, 1), min), AlertStatus::Normal);
    }

    #[test]
    fn expiry_boundaries() {
        assert_eq!(classify_expiry_days(-3), AlertStatus::Critical);
        assert_eq!(classify_expiry_days(7), AlertStatus::Critical);
        assert_eq!(classify_expiry_days(8), AlertStatus::Warning);
        assert_eq!(classify_expiry_days(15), AlertStatus::Warning);
        assert_eq!(classify_expiry_days(16), AlertStatus::Normal);
    }

    #[test]
    fn days_until_rounds_partial_days_up() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 15, 30, 0).unwrap();
        // 2025-03-08 00:00 fica a 6 dias e 8h30 -> 7
        assert_eq!(days_until(date(2025, 3, 8), now), 7);
        assert_eq!(classify_expiry(date(2025, 3, 8), now), AlertStatus::Critical);
        assert_eq!(days_until(date(2025, 3, 9), now), 8);
        assert_eq!(classify_expiry(date(2025, 3, 9), now), AlertStatus::Warning);

        let midnight = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(days_until(date(2025, 3, 16), midnight), 15);
        assert_eq!(days_until(date(2025, 3, 1), midnight), 0);
    }

    #[test]
    fn days_until_for_expired_items_is_not_positive() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        // -8.5 dias -> teto = -8
        assert_eq!(days_until(date(2025, 3, 2), now), -8);
        assert_eq!(days_until(date(2025, 3, 10), now), 0);
    }

    #[test]
    fn ranking_skips_products_without_expiration() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let products = vec![
            product("leite", Some(date(2025, 3, 20))),
            product("caneta", None),
            product("iogurte", Some(date(2025, 3, 4))),
            product("queijo", Some(date(2025, 3, 12))),
        ];

        let ranking = expiry_ranking(&products, now, 5);
        let names: Vec<&str> = ranking.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["iogurte", "queijo", "leite"]);
        assert_eq!(ranking[0].status, AlertStatus::Critical);
        assert_eq!(ranking[1].status, AlertStatus::Warning);
        assert_eq!(ranking[2].status, AlertStatus::Normal);
    }

    #[test]
    fn ranking_is_truncated_and_stable_across_runs() {
        let now = Utc::now();
        let today = now.date_naive();
        let products: Vec<Product> = (0..8)
            .map(|i| product(&format!("p{i}"), Some(today + Duration::days(30 - i))))
            .collect();

        let first = expiry_ranking(&products, now, 5);
        let second = expiry_ranking(&products, now, 5);
        assert_eq!(first.len(), 5);
        assert_eq!(first[0].name, "p7");
        let ids = |items: &[ExpiryItem]| items.iter().map(|i| i.id).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
    }
}
