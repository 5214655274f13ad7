//! Price alerts
//!
//! An alert watches one (product name, store) pair for an effective
//! price at or below a target. Evaluation looks back over a
//! configurable window of calendar months, prices the most recent
//! snapshot through the current best discounts, and fires at most once:
//! a triggered alert deactivates itself and stays inactive until
//! explicitly re-activated.

use std::sync::Arc;

use chrono::Months;
use rust_decimal::Decimal;
use shared::dto::TriggeredAlert;
use shared::models::{Alert, AlertCreate};

use crate::pricing::{money, DiscountService};
use crate::store::{ProductQuery, RecordStore};
use crate::utils::{time, AppResult};

#[derive(Clone)]
pub struct AlertService {
    store: Arc<dyn RecordStore>,
    discounts: DiscountService,
    /// Snapshot lookback window, in calendar months
    lookback_months: u32,
}

impl AlertService {
    pub fn new(store: Arc<dyn RecordStore>, discounts: DiscountService, lookback_months: u32) -> Self {
        Self {
            store,
            discounts,
            lookback_months,
        }
    }

    pub async fn all(&self) -> AppResult<Vec<Alert>> {
        Ok(self.store.find_alerts(false).await?)
    }

    /// Create a batch of alerts, active, stamped with today's date
    pub async fn create(&self, payloads: Vec<AlertCreate>) -> AppResult<Vec<Alert>> {
        let today = time::today();
        let mut saved = Vec::with_capacity(payloads.len());
        for payload in payloads {
            let alert = Alert {
                id: None,
                product_name: payload.product_name,
                store: payload.store,
                target_price: payload.target_price,
                active: true,
                creation_date: today,
            };
            saved.push(self.store.save_alert(alert).await?);
        }
        tracing::info!(count = saved.len(), "Created price alerts");
        Ok(saved)
    }

    pub async fn activate(&self, id: i64) -> AppResult<Alert> {
        self.set_active(id, true).await
    }

    pub async fn deactivate(&self, id: i64) -> AppResult<Alert> {
        self.set_active(id, false).await
    }

    async fn set_active(&self, id: i64, active: bool) -> AppResult<Alert> {
        let mut alert = self.store.alert_by_id(id).await?;
        alert.active = active;
        Ok(self.store.save_alert(alert).await?)
    }

    /// Evaluate every active alert against the latest snapshots.
    ///
    /// Returns the alerts that fired; each one is deactivated before
    /// this returns, so a second evaluation with unchanged data fires
    /// nothing.
    pub async fn evaluate_all(&self) -> AppResult<Vec<TriggeredAlert>> {
        let active = self.store.find_alerts(true).await?;
        if active.is_empty() {
            return Ok(Vec::new());
        }

        let today = time::today();
        let best = self.discounts.best_discount_map(today).await?;
        let window_start = today
            .checked_sub_months(Months::new(self.lookback_months))
            .unwrap_or(today);

        let mut triggered = Vec::new();
        for alert in active {
            let query = ProductQuery {
                name: Some(alert.product_name.clone()),
                store: Some(alert.store.clone()),
                date_range: Some((window_start, today)),
                ..ProductQuery::default()
            };
            // results are date-ascending, the last one is the latest
            let Some(product) = self.store.find_products(&query).await?.pop() else {
                tracing::debug!(
                    product_name = %alert.product_name,
                    store = %alert.store,
                    "No snapshot in lookback window for alert"
                );
                continue;
            };

            let discount = best
                .get(&product.name)
                .and_then(|per_store| per_store.get(&product.store));
            let effective = money::effective_price(&product, discount);
            if effective > money::to_decimal(alert.target_price) {
                continue;
            }

            let current_price = money::to_f64(effective);
            tracing::info!(
                product_name = %alert.product_name,
                store = %alert.store,
                target_price = alert.target_price,
                current_price,
                "Price alert triggered"
            );
            triggered.push(TriggeredAlert {
                product_name: alert.product_name.clone(),
                store: alert.store.clone(),
                target_price: alert.target_price,
                current_price,
                currency: product.currency.clone(),
                message: trigger_message(&product, discount, effective),
            });

            let mut fired = alert;
            fired.active = false;
            self.store.save_alert(fired).await?;
        }
        Ok(triggered)
    }
}

fn trigger_message(
    product: &shared::models::ProductSnapshot,
    discount: Option<&shared::models::DiscountSnapshot>,
    effective: Decimal,
) -> String {
    let price = money::to_f64(effective);
    match discount {
        Some(d) => format!(
            "Price dropped to {:.2} {} (Original: {:.2} {}, Discount: {}%)",
            price, product.currency, product.price, product.currency, d.percentage
        ),
        None => format!("Price dropped to {:.2} {}", price, product.currency),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::Duration;
    use shared::models::{DiscountSnapshot, PackageUnit, ProductSnapshot};

    fn product(name: &str, store: &str, price: f64, days_ago: i64) -> ProductSnapshot {
        ProductSnapshot {
            id: None,
            product_id: format!("{store}-{name}-{days_ago}"),
            name: name.into(),
            category: "lactate".into(),
            brand: "Zuzu".into(),
            package_quantity: 1.0,
            package_unit: PackageUnit::Liter,
            price,
            currency: "RON".into(),
            store: store.into(),
            price_date: time::today() - Duration::days(days_ago),
        }
    }

    fn discount(name: &str, store: &str, pct: f64) -> DiscountSnapshot {
        let today = time::today();
        DiscountSnapshot {
            id: None,
            product_id: format!("{store}-{name}"),
            product_name: name.into(),
            brand: "Zuzu".into(),
            package_quantity: 1.0,
            package_unit: PackageUnit::Liter,
            product_category: "lactate".into(),
            from_date: today - Duration::days(3),
            to_date: today + Duration::days(3),
            percentage: pct,
            store: store.into(),
            discount_date: today,
        }
    }

    async fn service(store: Arc<MemoryStore>) -> AlertService {
        let discounts = DiscountService::new(store.clone());
        AlertService::new(store, discounts, 1)
    }

    #[tokio::test]
    async fn alert_fires_once_and_deactivates() {
        let store = Arc::new(MemoryStore::new());
        store
            .upsert_products(vec![product("lapte zuzu", "lidl", 8.00, 0)])
            .await
            .unwrap();
        let svc = service(store.clone()).await;
        let created = svc
            .create(vec![AlertCreate {
                product_name: "lapte zuzu".into(),
                store: "lidl".into(),
                target_price: 8.50,
            }])
            .await
            .unwrap();

        let triggered = svc.evaluate_all().await.unwrap();
        assert_eq!(triggered.len(), 1);
        assert_eq!(triggered[0].current_price, 8.00);
        assert_eq!(triggered[0].message, "Price dropped to 8.00 RON");

        // one-shot: the fired alert is now inactive
        let id = created[0].id.unwrap();
        assert!(!store.alert_by_id(id).await.unwrap().active);
        assert!(svc.evaluate_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn discount_can_push_price_under_target() {
        let store = Arc::new(MemoryStore::new());
        store
            .upsert_products(vec![product("lapte zuzu", "lidl", 9.80, 1)])
            .await
            .unwrap();
        store
            .upsert_discounts(vec![discount("lapte zuzu", "lidl", 12.0)])
            .await
            .unwrap();
        let svc = service(store.clone()).await;
        svc.create(vec![AlertCreate {
            product_name: "lapte zuzu".into(),
            store: "lidl".into(),
            target_price: 8.62,
        }])
        .await
        .unwrap();

        let triggered = svc.evaluate_all().await.unwrap();
        assert_eq!(triggered.len(), 1);
        assert_eq!(triggered[0].current_price, 8.62);
        assert!(triggered[0].message.contains("Discount: 12%"));
    }

    #[tokio::test]
    async fn latest_snapshot_in_window_is_the_one_compared() {
        let store = Arc::new(MemoryStore::new());
        store
            .upsert_products(vec![
                product("lapte zuzu", "lidl", 7.00, 10),
                product("lapte zuzu", "lidl", 9.80, 0),
            ])
            .await
            .unwrap();
        let svc = service(store.clone()).await;
        svc.create(vec![AlertCreate {
            product_name: "lapte zuzu".into(),
            store: "lidl".into(),
            target_price: 8.00,
        }])
        .await
        .unwrap();

        // latest price is 9.80, above target, the old 7.00 must not fire it
        assert!(svc.evaluate_all().await.unwrap().is_empty());
    }
}
