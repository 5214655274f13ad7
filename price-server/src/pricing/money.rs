//! Money calculation utilities using rust_decimal for precision
//!
//! All price arithmetic is done with `Decimal` internally, then
//! converted back to `f64` for the serialized models. Currency amounts
//! round to 2 decimal places, half-up.

use rust_decimal::prelude::*;

use shared::models::{DiscountSnapshot, ProductSnapshot};

/// Rounding precision for monetary values
const DECIMAL_PLACES: u32 = 2;

/// Rounding precision for per-unit values (price / package quantity)
const UNIT_VALUE_PLACES: u32 = 4;

/// Convert an f64 price into Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// Effective price of a snapshot under an optional discount.
///
/// The discount amount `price * pct / 100` rounds to 2 decimal places
/// half-up *before* the subtraction, matching currency semantics:
/// 9.80 at 12% discounts by round2(1.176) = 1.18 to 8.62.
pub fn effective_price(product: &ProductSnapshot, discount: Option<&DiscountSnapshot>) -> Decimal {
    let price = to_decimal(product.price);
    match discount {
        Some(d) => {
            let amount = (price * to_decimal(d.percentage) / Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
            price - amount
        }
        None => price,
    }
}

/// Per-unit value of a snapshot: price / package_quantity, 4 decimal
/// places half-up. Returns `None` for non-positive quantities, which
/// the caller excludes from value-per-unit output.
pub fn unit_value(product: &ProductSnapshot) -> Option<f64> {
    if product.package_quantity <= 0.0 {
        return None;
    }
    let value = to_decimal(product.price) / to_decimal(product.package_quantity);
    value
        .round_dp_with_strategy(UNIT_VALUE_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::PackageUnit;

    fn product(price: f64, quantity: f64) -> ProductSnapshot {
        ProductSnapshot {
            id: None,
            product_id: "P001".into(),
            name: "lapte zuzu".into(),
            category: "lactate".into(),
            brand: "Zuzu".into(),
            package_quantity: quantity,
            package_unit: PackageUnit::Liter,
            price,
            currency: "RON".into(),
            store: "lidl".into(),
            price_date: "2025-05-08".parse().unwrap(),
        }
    }

    fn discount(percentage: f64) -> DiscountSnapshot {
        DiscountSnapshot {
            id: None,
            product_id: "P001".into(),
            product_name: "lapte zuzu".into(),
            brand: "Zuzu".into(),
            package_quantity: 1.0,
            package_unit: PackageUnit::Liter,
            product_category: "lactate".into(),
            from_date: "2025-05-08".parse().unwrap(),
            to_date: "2025-05-14".parse().unwrap(),
            percentage,
            store: "lidl".into(),
            discount_date: "2025-05-08".parse().unwrap(),
        }
    }

    #[test]
    fn effective_price_rounds_discount_amount_half_up() {
        // 9.80 * 12% = 1.176, rounds to 1.18 -> 8.62
        let p = product(9.80, 1.0);
        let d = discount(12.0);
        assert_eq!(to_f64(effective_price(&p, Some(&d))), 8.62);
    }

    #[test]
    fn effective_price_without_discount_is_shelf_price() {
        let p = product(9.80, 1.0);
        assert_eq!(to_f64(effective_price(&p, None)), 9.80);
    }

    #[test]
    fn hundred_percent_discount_reaches_zero() {
        let p = product(5.00, 1.0);
        let d = discount(100.0);
        assert_eq!(to_f64(effective_price(&p, Some(&d))), 0.0);
    }

    #[test]
    fn unit_value_uses_four_places() {
        // 9.80 / 3 = 3.26666... -> 3.2667
        let p = product(9.80, 3.0);
        assert_eq!(unit_value(&p), Some(3.2667));
    }

    #[test]
    fn unit_value_excludes_non_positive_quantity() {
        assert_eq!(unit_value(&product(9.80, 0.0)), None);
        assert_eq!(unit_value(&product(9.80, -1.0)), None);
    }
}
