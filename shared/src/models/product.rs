//! Product Snapshot Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::unit::PackageUnit;

/// One store's reported price for one product on one calendar date.
///
/// Identity is (product_id, store, price_date): re-importing the same
/// key updates the mutable fields in place, it never creates a second
/// record. Snapshots are only ever written by the importer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Record ID, assigned by the store on first save
    pub id: Option<i64>,
    /// External product ID from the source feed (identity, immutable)
    pub product_id: String,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub package_quantity: f64,
    pub package_unit: PackageUnit,
    /// Shelf price, 2 fraction digits of currency precision
    pub price: f64,
    /// ISO currency code, e.g. "RON"
    pub currency: String,
    /// Store name from the snapshot filename (identity, immutable)
    pub store: String,
    /// Snapshot date from the filename (identity, immutable)
    pub price_date: NaiveDate,
}
