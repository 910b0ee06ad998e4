//! Money arithmetic
//!
//! Totals are computed in `Decimal` and converted to `f64` (2 dp, half-up)
//! only for storage and serialization.

use rust_decimal::prelude::*;

const DECIMAL_PLACES: u32 = 2;

#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert back to `f64`, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Σ unit price × quantity
pub fn order_total(lines: impl IntoIterator<Item = (f64, i32)>) -> f64 {
    let total: Decimal = lines
        .into_iter()
        .map(|(unit_price, quantity)| to_decimal(unit_price) * Decimal::from(quantity))
        .sum();
    to_f64(total)
}
