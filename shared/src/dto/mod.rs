//! Request and response DTOs for the HTTP boundary

pub mod alert;
pub mod basket;
pub mod discount;
pub mod import;
pub mod product;

pub use alert::TriggeredAlert;
pub use basket::{BasketItem, OptimizedBasket, ShoppingList};
pub use discount::BestDiscount;
pub use import::{ImportCounters, ImportReport};
pub use product::{PriceHistory, PricePoint, ValuePerUnit};
