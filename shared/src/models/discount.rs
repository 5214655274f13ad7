//! Discount Snapshot Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::unit::PackageUnit;

/// One store's advertised discount for one product, as published in a
/// discount file on `discount_date`.
///
/// Identity is (product_id, store, discount_date). The validity window
/// [from_date, to_date] is independent of the discount date: a file
/// published on Monday may advertise a window starting Thursday.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountSnapshot {
    /// Record ID, assigned by the store on first save
    pub id: Option<i64>,
    /// External product ID from the source feed (identity, immutable)
    pub product_id: String,
    pub product_name: String,
    pub brand: String,
    pub package_quantity: f64,
    pub package_unit: PackageUnit,
    pub product_category: String,
    /// First day the discount applies (inclusive)
    pub from_date: NaiveDate,
    /// Last day the discount applies (inclusive)
    pub to_date: NaiveDate,
    /// Discount percentage in (0, 100]
    pub percentage: f64,
    /// Store name from the filename (identity, immutable)
    pub store: String,
    /// Date segment of the discount filename (identity, immutable,
    /// never touched by later updates to the same key)
    pub discount_date: NaiveDate,
}

impl DiscountSnapshot {
    /// Whether the validity window contains `date`
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.from_date <= date && date <= self.to_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PackageUnit;

    fn discount(from: &str, to: &str) -> DiscountSnapshot {
        DiscountSnapshot {
            id: None,
            product_id: "P001".into(),
            product_name: "lapte zuzu".into(),
            brand: "Zuzu".into(),
            package_quantity: 1.0,
            package_unit: PackageUnit::Liter,
            product_category: "lactate".into(),
            from_date: from.parse().unwrap(),
            to_date: to.parse().unwrap(),
            percentage: 12.0,
            store: "lidl".into(),
            discount_date: "2025-05-08".parse().unwrap(),
        }
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let d = discount("2025-05-08", "2025-05-14");
        assert!(d.is_active_on("2025-05-08".parse().unwrap()));
        assert!(d.is_active_on("2025-05-14".parse().unwrap()));
        assert!(!d.is_active_on("2025-05-07".parse().unwrap()));
        assert!(!d.is_active_on("2025-05-15".parse().unwrap()));
    }
}
