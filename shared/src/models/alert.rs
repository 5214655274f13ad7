//! Price Alert Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A user's target-price watch on a (product name, store) pair.
///
/// Alerts are one-shot: the evaluator flips `active` to false the
/// first time the effective price reaches the target, and nothing
/// re-arms it automatically. Reactivation is an explicit user action
/// that resets only the flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// Record ID, assigned by the store on first save
    pub id: Option<i64>,
    pub product_name: String,
    pub store: String,
    /// Trigger threshold, must be > 0
    pub target_price: f64,
    pub active: bool,
    pub creation_date: NaiveDate,
}

/// Create alert payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertCreate {
    pub product_name: String,
    pub store: String,
    pub target_price: f64,
}
