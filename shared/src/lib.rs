//! Shared types for the price comparator service
//!
//! Domain entities, request/response DTOs, and small utilities used by
//! the server crate and by integration tests.

pub mod dto;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{Alert, DiscountSnapshot, PackageUnit, ProductSnapshot};
