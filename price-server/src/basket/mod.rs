//! Shopping basket optimization
//!
//! For each requested item, find the cheapest effective offer across
//! every store that snapshotted the product on the given date, then
//! group the winning picks into one shopping list per store.
//!
//! | Rule | Behavior |
//! |------|----------|
//! | Candidate set | snapshots matching product name on the exact date |
//! | Winner | lowest effective price; first encountered wins ties |
//! | Missing product | dropped with a warning, basket still produced |
//! | Totals | Decimal sums of quantity * price, rounded at the edge |

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::dto::{BasketItem, OptimizedBasket, ShoppingList};
use shared::models::ProductSnapshot;

use crate::pricing::money;
use crate::pricing::{BestDiscountMap, DiscountService};
use crate::store::{ProductQuery, RecordStore};
use crate::utils::AppResult;

/// Winning pick for one basket item, before store grouping
struct Pick {
    product: ProductSnapshot,
    effective: Decimal,
    quantity: u32,
}

#[derive(Clone)]
pub struct BasketService {
    store: Arc<dyn RecordStore>,
    discounts: DiscountService,
}

impl BasketService {
    pub fn new(store: Arc<dyn RecordStore>, discounts: DiscountService) -> Self {
        Self { store, discounts }
    }

    /// Optimize a basket against the snapshots of `date`.
    ///
    /// An empty item list yields an empty basket with zero totals.
    pub async fn optimize(&self, items: &[BasketItem], date: NaiveDate) -> AppResult<OptimizedBasket> {
        let best = self.discounts.best_discount_map(date).await?;

        // store name -> winning picks, BTreeMap keeps lists in store order
        let mut per_store: BTreeMap<String, Vec<Pick>> = BTreeMap::new();
        for item in items {
            match self.cheapest_offer(item, date, &best).await? {
                Some(pick) => {
                    per_store.entry(pick.product.store.clone()).or_default().push(pick);
                }
                None => {
                    tracing::warn!(
                        product_name = %item.product_name,
                        %date,
                        "No snapshot for basket item, dropping it"
                    );
                }
            }
        }

        let mut basket = OptimizedBasket::default();
        let mut total_original = Decimal::ZERO;
        let mut total_effective = Decimal::ZERO;

        for (store_name, picks) in per_store {
            let mut original = Decimal::ZERO;
            let mut effective = Decimal::ZERO;
            let mut products = Vec::with_capacity(picks.len());

            for pick in picks {
                let quantity = Decimal::from(pick.quantity);
                original += money::to_decimal(pick.product.price) * quantity;
                effective += pick.effective * quantity;

                // the listed product carries its effective price
                let mut listed = pick.product;
                listed.price = money::to_f64(pick.effective);
                products.push(listed);
            }

            total_original += original;
            total_effective += effective;
            basket.store_shopping_lists.push(ShoppingList {
                store_name,
                item_count: products.len(),
                products,
                original_cost: money::to_f64(original),
                cost_after_discounts: money::to_f64(effective),
                savings: money::to_f64(original - effective),
            });
        }

        basket.total_original_cost = money::to_f64(total_original);
        basket.total_cost_after_discounts = money::to_f64(total_effective);
        basket.total_savings = money::to_f64(total_original - total_effective);
        Ok(basket)
    }

    /// Lowest effective offer for one item, `None` when no store carries it
    async fn cheapest_offer(
        &self,
        item: &BasketItem,
        date: NaiveDate,
        best: &BestDiscountMap,
    ) -> AppResult<Option<Pick>> {
        let query = ProductQuery {
            name: Some(item.product_name.clone()),
            price_date: Some(date),
            ..ProductQuery::default()
        };
        let candidates = self.store.find_products(&query).await?;

        let mut winner: Option<Pick> = None;
        for product in candidates {
            let discount = best
                .get(&product.name)
                .and_then(|per_store| per_store.get(&product.store));
            let effective = money::effective_price(&product, discount);

            // strictly cheaper replaces, so equal prices keep the first offer
            let replace = match &winner {
                Some(held) => effective < held.effective,
                None => true,
            };
            if replace {
                winner = Some(Pick {
                    product,
                    effective,
                    quantity: item.quantity,
                });
            }
        }
        Ok(winner)
    }
}
