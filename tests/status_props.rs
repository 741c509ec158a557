//! Propriedades dos classificadores de estoque e validade.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use edu_estoque::{
    models::inventory::AlertStatus,
    services::status::{classify_expiry, classify_stock, days_until, STOCK_WARNING_BAND},
};

proptest! {
    #[test]
    fn stock_at_or_below_minimum_is_critical(min in 0i64..10_000, below in 0i64..10_000) {
        let min_stock = Decimal::from(min);
        let quantity = Decimal::from(min - below);
        prop_assert_eq!(classify_stock(quantity, min_stock), AlertStatus::Critical);
    }

    #[test]
    fn stock_within_band_is_warning(min in 0i64..10_000, above in 1i64..=STOCK_WARNING_BAND) {
        let min_stock = Decimal::from(min);
        prop_assert_eq!(
            classify_stock(min_stock + Decimal::from(above), min_stock),
            AlertStatus::Warning
        );
    }

    #[test]
    fn stock_beyond_band_is_normal(min in 0i64..10_000, above in (STOCK_WARNING_BAND + 1)..100_000) {
        let min_stock = Decimal::from(min);
        prop_assert_eq!(
            classify_stock(min_stock + Decimal::from(above), min_stock),
            AlertStatus::Normal
        );
    }

    #[test]
    fn days_left_never_undercounts(offset_days in -400i64..400, seconds in 0i64..86_400) {
        let expiration = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let midnight = Utc.from_utc_datetime(&expiration.and_hms_opt(0, 0, 0).unwrap());
        let now = midnight - Duration::days(offset_days) + Duration::seconds(seconds);

        let days = days_until(expiration, now);
        let exact = (midnight - now).num_seconds() as f64 / 86_400.0;

        prop_assert!(days as f64 >= exact);
        prop_assert!((days as f64) - exact < 1.0);
    }
}

#[test]
fn expiry_thresholds_match_the_screen_colors() {
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    let day = |d: u32| NaiveDate::from_ymd_opt(2025, 6, d).unwrap();

    // 00:00 do dia 8 está a 6,5 dias: teto 7
    assert_eq!(days_until(day(8), now), 7);
    assert_eq!(classify_expiry(day(8), now), AlertStatus::Critical);
    assert_eq!(classify_expiry(day(9), now), AlertStatus::Warning);
    assert_eq!(classify_expiry(day(16), now), AlertStatus::Warning);
    assert_eq!(classify_expiry(day(17), now), AlertStatus::Normal);
    assert_eq!(classify_expiry(day(1), now), AlertStatus::Critical);
}
