//! Record store boundary
//!
//! The core algorithms never touch storage directly: they speak to a
//! [`RecordStore`], a storage-agnostic trait over product snapshots,
//! discount snapshots, and alerts. The bundled implementation is the
//! in-memory [`MemoryStore`]; a database-backed implementation can be
//! swapped in behind the same trait.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use shared::models::{Alert, DiscountSnapshot, ProductSnapshot};

/// Record store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Internal(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Filter for product snapshot queries.
///
/// All fields are conjunctive; `None` means "don't care". Results are
/// always ordered by price_date ascending (then store, then product id)
/// so date-window callers can take the last element as the most recent.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub store: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    /// Exact snapshot date
    pub price_date: Option<NaiveDate>,
    /// Inclusive snapshot date range
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

/// Filter for discount snapshot queries
#[derive(Debug, Clone, Default)]
pub struct DiscountQuery {
    pub store: Option<String>,
    /// Exact discount (filename) date
    pub discount_date: Option<NaiveDate>,
    /// Discount date lower bound (inclusive)
    pub discount_date_from: Option<NaiveDate>,
    /// Validity window must contain this date
    pub active_on: Option<NaiveDate>,
}

/// Storage-agnostic record store consumed by the core services
#[async_trait]
pub trait RecordStore: Send + Sync {
    // ========== Product snapshots ==========
    async fn find_products(&self, query: &ProductQuery) -> StoreResult<Vec<ProductSnapshot>>;
    async fn product_by_id(&self, id: i64) -> StoreResult<ProductSnapshot>;
    /// Insert or update a batch, keyed on (product_id, store, price_date).
    /// Identity fields are set once at creation and never altered.
    async fn upsert_products(&self, batch: Vec<ProductSnapshot>) -> StoreResult<()>;

    // ========== Discount snapshots ==========
    async fn find_discounts(&self, query: &DiscountQuery) -> StoreResult<Vec<DiscountSnapshot>>;
    /// Insert or update a batch, keyed on (product_id, store, discount_date)
    async fn upsert_discounts(&self, batch: Vec<DiscountSnapshot>) -> StoreResult<()>;

    // ========== Alerts ==========
    async fn find_alerts(&self, active_only: bool) -> StoreResult<Vec<Alert>>;
    async fn alert_by_id(&self, id: i64) -> StoreResult<Alert>;
    /// Create (id = None, the store assigns one) or update (id = Some)
    async fn save_alert(&self, alert: Alert) -> StoreResult<Alert>;
}
