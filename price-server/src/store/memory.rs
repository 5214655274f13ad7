//! In-memory record store
//!
//! `BTreeMap`s behind `parking_lot::RwLock`s, one lock per collection.
//! BTreeMap keys give a stable iteration order, which keeps "first
//! encountered wins" tie-breaks deterministic across runs.

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::collections::BTreeMap;

use shared::models::{Alert, DiscountSnapshot, ProductSnapshot};
use shared::util::snowflake_id;

use super::{DiscountQuery, ProductQuery, RecordStore, StoreError, StoreResult};

/// Identity key: (product_id, store, date)
type SnapshotKey = (String, String, NaiveDate);

#[derive(Default)]
pub struct MemoryStore {
    products: RwLock<BTreeMap<SnapshotKey, ProductSnapshot>>,
    discounts: RwLock<BTreeMap<SnapshotKey, DiscountSnapshot>>,
    alerts: RwLock<BTreeMap<i64, Alert>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("products", &self.products.read().len())
            .field("discounts", &self.discounts.read().len())
            .field("alerts", &self.alerts.read().len())
            .finish()
    }
}

fn matches_product(p: &ProductSnapshot, q: &ProductQuery) -> bool {
    if let Some(store) = &q.store
        && &p.store != store
    {
        return false;
    }
    if let Some(name) = &q.name
        && &p.name != name
    {
        return false;
    }
    if let Some(category) = &q.category
        && &p.category != category
    {
        return false;
    }
    if let Some(brand) = &q.brand
        && &p.brand != brand
    {
        return false;
    }
    if let Some(date) = q.price_date
        && p.price_date != date
    {
        return false;
    }
    if let Some((start, end)) = q.date_range
        && (p.price_date < start || p.price_date > end)
    {
        return false;
    }
    true
}

fn matches_discount(d: &DiscountSnapshot, q: &DiscountQuery) -> bool {
    if let Some(store) = &q.store
        && &d.store != store
    {
        return false;
    }
    if let Some(date) = q.discount_date
        && d.discount_date != date
    {
        return false;
    }
    if let Some(from) = q.discount_date_from
        && d.discount_date < from
    {
        return false;
    }
    if let Some(on) = q.active_on
        && !d.is_active_on(on)
    {
        return false;
    }
    true
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find_products(&self, query: &ProductQuery) -> StoreResult<Vec<ProductSnapshot>> {
        let products = self.products.read();
        let mut hits: Vec<ProductSnapshot> = products
            .values()
            .filter(|p| matches_product(p, query))
            .cloned()
            .collect();
        hits.sort_by(|a, b| {
            (a.price_date, &a.store, &a.product_id).cmp(&(b.price_date, &b.store, &b.product_id))
        });
        Ok(hits)
    }

    async fn product_by_id(&self, id: i64) -> StoreResult<ProductSnapshot> {
        self.products
            .read()
            .values()
            .find(|p| p.id == Some(id))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Product not found with id: {}", id)))
    }

    async fn upsert_products(&self, batch: Vec<ProductSnapshot>) -> StoreResult<()> {
        let mut products = self.products.write();
        for mut snapshot in batch {
            let key = (
                snapshot.product_id.clone(),
                snapshot.store.clone(),
                snapshot.price_date,
            );
            if let Some(existing) = products.get(&key) {
                // Keep the record id stable across re-imports
                snapshot.id = existing.id;
            } else if snapshot.id.is_none() {
                snapshot.id = Some(snowflake_id());
            }
            products.insert(key, snapshot);
        }
        Ok(())
    }

    async fn find_discounts(&self, query: &DiscountQuery) -> StoreResult<Vec<DiscountSnapshot>> {
        let discounts = self.discounts.read();
        Ok(discounts
            .values()
            .filter(|d| matches_discount(d, query))
            .cloned()
            .collect())
    }

    async fn upsert_discounts(&self, batch: Vec<DiscountSnapshot>) -> StoreResult<()> {
        let mut discounts = self.discounts.write();
        for mut snapshot in batch {
            let key = (
                snapshot.product_id.clone(),
                snapshot.store.clone(),
                snapshot.discount_date,
            );
            if let Some(existing) = discounts.get(&key) {
                snapshot.id = existing.id;
            } else if snapshot.id.is_none() {
                snapshot.id = Some(snowflake_id());
            }
            discounts.insert(key, snapshot);
        }
        Ok(())
    }

    async fn find_alerts(&self, active_only: bool) -> StoreResult<Vec<Alert>> {
        let alerts = self.alerts.read();
        Ok(alerts
            .values()
            .filter(|a| !active_only || a.active)
            .cloned()
            .collect())
    }

    async fn alert_by_id(&self, id: i64) -> StoreResult<Alert> {
        self.alerts
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Price alert not found with ID: {}", id)))
    }

    async fn save_alert(&self, mut alert: Alert) -> StoreResult<Alert> {
        let mut alerts = self.alerts.write();
        let id = match alert.id {
            Some(id) => id,
            None => {
                let id = snowflake_id();
                alert.id = Some(id);
                id
            }
        };
        alerts.insert(id, alert.clone());
        Ok(alert)
    }
}
