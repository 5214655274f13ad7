//! Alert DTOs

use serde::{Deserialize, Serialize};

/// A fired alert, produced by one evaluation pass.
///
/// `current_price` is the effective price (after discount), not the
/// shelf price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggeredAlert {
    pub product_name: String,
    pub store: String,
    pub target_price: f64,
    pub current_price: f64,
    pub currency: String,
    /// Human-readable summary, includes the discount percentage when
    /// one applied
    pub message: String,
}
