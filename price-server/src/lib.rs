//! Price Server - grocery price comparison core
//!
//! # Architecture overview
//!
//! - **Importer** (`importer`): CSV snapshot directory ingestion
//! - **Record store** (`store`): storage boundary with in-memory implementation
//! - **Pricing** (`pricing`): money arithmetic and discount resolution
//! - **Basket** (`basket`): cheapest-store basket optimization
//! - **Alerts** (`alerts`): one-shot price alerts
//! - **HTTP API** (`api`): RESTful interface
//!
//! # Module structure
//!
//! ```text
//! price-server/src/
//! ├── core/          # configuration, state, server lifecycle
//! ├── importer/      # snapshot file scanning and parsing
//! ├── store/         # RecordStore trait + MemoryStore
//! ├── pricing/       # Decimal helpers, discount resolver
//! ├── basket/        # basket optimizer
//! ├── alerts/        # price alert evaluation
//! ├── products/      # product query services
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # errors, logging, time helpers
//! ```

pub mod alerts;
pub mod api;
pub mod basket;
pub mod core;
pub mod importer;
pub mod pricing;
pub mod products;
pub mod store;
pub mod utils;

// Re-export common types
pub use core::{Config, Server, ServerState};
pub use store::{MemoryStore, RecordStore};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
