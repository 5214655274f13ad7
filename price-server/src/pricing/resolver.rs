//! Discount selection
//!
//! Discount snapshots from different stores (and re-imports of the same
//! store) can overlap: several entries may cover the same product name on
//! the same day. The resolver folds them down to at most one winning
//! discount per (product name, store), always keeping the highest
//! percentage. Ties keep the entry encountered first.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use shared::dto::BestDiscount;
use shared::models::DiscountSnapshot;

use crate::store::{DiscountQuery, RecordStore};
use crate::utils::{AppResult, time};

/// product name -> store -> winning discount
pub type BestDiscountMap = HashMap<String, HashMap<String, DiscountSnapshot>>;

/// Read-side discount queries and best-discount folding
#[derive(Clone)]
pub struct DiscountService {
    store: Arc<dyn RecordStore>,
}

impl DiscountService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Every stored discount snapshot
    pub async fn all(&self) -> AppResult<Vec<DiscountSnapshot>> {
        Ok(self.store.find_discounts(&DiscountQuery::default()).await?)
    }

    /// Discounts whose validity window contains `date` (bounds inclusive)
    pub async fn current(&self, date: NaiveDate) -> AppResult<Vec<DiscountSnapshot>> {
        let query = DiscountQuery {
            active_on: Some(date),
            ..DiscountQuery::default()
        };
        Ok(self.store.find_discounts(&query).await?)
    }

    /// Discounts first seen within the last `days_back` days
    pub async fn recently_added(&self, days_back: u32) -> AppResult<Vec<DiscountSnapshot>> {
        let since = time::today() - Duration::days(i64::from(days_back));
        let query = DiscountQuery {
            discount_date_from: Some(since),
            ..DiscountQuery::default()
        };
        Ok(self.store.find_discounts(&query).await?)
    }

    /// Highest-percentage discounts active on `date`, one entry per
    /// (product name, brand), ordered by percentage descending and cut
    /// off at `limit`.
    pub async fn best(&self, date: NaiveDate, limit: usize) -> AppResult<Vec<BestDiscount>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut per_product: BTreeMap<(String, String), DiscountSnapshot> = BTreeMap::new();
        for discount in self.current(date).await? {
            let key = (discount.product_name.clone(), discount.brand.clone());
            match per_product.get(&key) {
                Some(held) if discount.percentage <= held.percentage => {}
                _ => {
                    per_product.insert(key, discount);
                }
            }
        }

        let mut best: Vec<BestDiscount> = per_product
            .into_values()
            .map(|d| BestDiscount {
                product_name: d.product_name,
                brand: d.brand,
                store: d.store,
                from_date: d.from_date,
                to_date: d.to_date,
                percentage: d.percentage,
            })
            .collect();
        best.sort_by(|a, b| {
            b.percentage
                .partial_cmp(&a.percentage)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        best.truncate(limit);
        Ok(best)
    }

    /// Fold the discounts active on `date` into a per-(name, store)
    /// lookup keeping the highest percentage. The basket optimizer and
    /// the alert evaluator both price products through this map.
    pub async fn best_discount_map(&self, date: NaiveDate) -> AppResult<BestDiscountMap> {
        Ok(fold_best(self.current(date).await?))
    }
}

/// Keep, per (product name, store), the discount with the highest
/// percentage. First encountered wins on equal percentage.
pub fn fold_best(discounts: Vec<DiscountSnapshot>) -> BestDiscountMap {
    let mut map: BestDiscountMap = HashMap::new();
    for discount in discounts {
        let per_store = map.entry(discount.product_name.clone()).or_default();
        match per_store.get(&discount.store) {
            Some(held) if discount.percentage <= held.percentage => {}
            _ => {
                per_store.insert(discount.store.clone(), discount);
            }
        }
    }
    map
}
