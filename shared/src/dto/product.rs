//! Product query DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::PackageUnit;

/// Price divided by package quantity, for cross-pack-size comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuePerUnit {
    pub product_name: String,
    pub brand: String,
    pub store: String,
    pub price: f64,
    pub package_quantity: f64,
    pub package_unit: PackageUnit,
    /// price / package_quantity, 4 fraction digits
    pub value_per_unit: f64,
    pub currency: String,
}

/// One observed price on one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// Price trajectory of one product in one store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceHistory {
    pub product_name: String,
    pub store: String,
    /// Ascending by date
    pub price_history: Vec<PricePoint>,
}
