//! Basket optimization DTOs

use serde::{Deserialize, Serialize};

use crate::models::ProductSnapshot;

/// One basket line: product name plus desired quantity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasketItem {
    pub product_name: String,
    /// Must be >= 1 (validated at the API edge)
    pub quantity: u32,
}

/// Per-store shopping list inside an optimized basket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingList {
    pub store_name: String,
    /// Selected products with the *effective* (discounted) price
    pub products: Vec<ProductSnapshot>,
    pub item_count: usize,
    pub original_cost: f64,
    pub cost_after_discounts: f64,
    pub savings: f64,
}

/// Result of a basket optimization pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptimizedBasket {
    pub total_original_cost: f64,
    pub total_cost_after_discounts: f64,
    pub total_savings: f64,
    /// Sorted by store name ascending for determinism
    pub store_shopping_lists: Vec<ShoppingList>,
}
