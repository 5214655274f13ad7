//! Domain entities
//!
//! One snapshot record = one store's reported state (price or discount)
//! for one calendar date, sourced from one import file.

pub mod alert;
pub mod discount;
pub mod product;
pub mod unit;

pub use alert::{Alert, AlertCreate};
pub use discount::DiscountSnapshot;
pub use product::ProductSnapshot;
pub use unit::PackageUnit;
