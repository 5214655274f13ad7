//! Shared server state
//!
//! One [`ServerState`] is built at startup and cloned into every
//! request handler. All services share a single [`RecordStore`] behind
//! an `Arc`, so cloning is cheap.

use std::sync::Arc;

use crate::alerts::AlertService;
use crate::basket::BasketService;
use crate::importer::ImportService;
use crate::pricing::DiscountService;
use crate::products::ProductService;
use crate::store::{MemoryStore, RecordStore};

use super::config::Config;

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub store: Arc<dyn RecordStore>,
    pub products: ProductService,
    pub discounts: DiscountService,
    pub basket: BasketService,
    pub alerts: AlertService,
    pub importer: ImportService,
}

impl ServerState {
    /// State backed by the in-memory store
    pub fn new(config: Config) -> Self {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    /// State over an explicit store implementation
    pub fn with_store(config: Config, store: Arc<dyn RecordStore>) -> Self {
        let discounts = DiscountService::new(store.clone());
        Self {
            products: ProductService::new(store.clone(), config.history_default_span_years),
            basket: BasketService::new(store.clone(), discounts.clone()),
            alerts: AlertService::new(store.clone(), discounts.clone(), config.alert_lookback_months),
            importer: ImportService::new(store.clone()),
            discounts,
            store,
            config,
        }
    }
}
