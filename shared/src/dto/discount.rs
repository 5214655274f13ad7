//! Discount query DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Best active discount for a (product, brand) pair across all stores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestDiscount {
    pub product_name: String,
    pub brand: String,
    pub store: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub percentage: f64,
}
