//! Discount resolution and price arithmetic
//!
//! [`money`] holds the Decimal helpers shared by every component that
//! touches a price; [`resolver`] selects the single applicable discount
//! per (product, store) out of possibly conflicting snapshot entries.

pub mod money;
pub mod resolver;

pub use resolver::{BestDiscountMap, DiscountService};
