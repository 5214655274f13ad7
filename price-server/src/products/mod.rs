//! Product snapshot queries
//!
//! Read-side views over the snapshot history: plain listings, per-unit
//! value comparison for a single day, and price history series grouped
//! per (product name, store).

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Months, NaiveDate};
use shared::dto::{PriceHistory, PricePoint, ValuePerUnit};
use shared::models::ProductSnapshot;

use crate::pricing::money;
use crate::store::{ProductQuery, RecordStore};
use crate::utils::{time, AppError, AppResult};

/// Dimension a price-history query filters on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryFilter {
    Name,
    Category,
    Brand,
}

impl HistoryFilter {
    /// Parse the query-string form; anything but name/category/brand
    /// is a caller error.
    pub fn parse(raw: &str) -> AppResult<Self> {
        match raw {
            "name" => Ok(Self::Name),
            "category" => Ok(Self::Category),
            "brand" => Ok(Self::Brand),
            other => Err(AppError::validation(format!(
                "Invalid filter '{other}', expected one of: name, category, brand"
            ))),
        }
    }
}

#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn RecordStore>,
    /// Default history half-span on each side of today, in years
    history_span_years: u32,
}

impl ProductService {
    pub fn new(store: Arc<dyn RecordStore>, history_span_years: u32) -> Self {
        Self {
            store,
            history_span_years,
        }
    }

    pub async fn all(&self) -> AppResult<Vec<ProductSnapshot>> {
        Ok(self.store.find_products(&ProductQuery::default()).await?)
    }

    pub async fn by_id(&self, id: i64) -> AppResult<ProductSnapshot> {
        Ok(self.store.product_by_id(id).await?)
    }

    pub async fn by_name_and_date(
        &self,
        name: &str,
        date: NaiveDate,
    ) -> AppResult<Vec<ProductSnapshot>> {
        let query = ProductQuery {
            name: Some(name.to_string()),
            price_date: Some(date),
            ..ProductQuery::default()
        };
        Ok(self.store.find_products(&query).await?)
    }

    pub async fn by_store_and_date(
        &self,
        store: &str,
        date: NaiveDate,
    ) -> AppResult<Vec<ProductSnapshot>> {
        let query = ProductQuery {
            store: Some(store.to_string()),
            price_date: Some(date),
            ..ProductQuery::default()
        };
        Ok(self.store.find_products(&query).await?)
    }

    /// Price per package unit for every snapshot of `date`, sorted by
    /// (product name, value). Snapshots with a non-positive package
    /// quantity cannot be normalized and are skipped with a warning.
    pub async fn value_per_unit(&self, date: NaiveDate) -> AppResult<Vec<ValuePerUnit>> {
        let query = ProductQuery {
            price_date: Some(date),
            ..ProductQuery::default()
        };
        let snapshots = self.store.find_products(&query).await?;

        let mut values: Vec<ValuePerUnit> = Vec::with_capacity(snapshots.len());
        for product in snapshots {
            let Some(value) = money::unit_value(&product) else {
                tracing::warn!(
                    product_id = %product.product_id,
                    store = %product.store,
                    package_quantity = product.package_quantity,
                    "Non-positive package quantity, excluding from value per unit"
                );
                continue;
            };
            values.push(ValuePerUnit {
                product_name: product.name,
                brand: product.brand,
                store: product.store,
                price: product.price,
                currency: product.currency,
                package_quantity: product.package_quantity,
                package_unit: product.package_unit,
                value_per_unit: value,
            });
        }
        values.sort_by(|a, b| {
            a.product_name.cmp(&b.product_name).then(
                a.value_per_unit
                    .partial_cmp(&b.value_per_unit)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
        });
        Ok(values)
    }

    /// Price history series matching one filter dimension, one series
    /// per (product name, store), points date-ascending.
    ///
    /// Omitted range bounds default to the configured span on each side
    /// of today.
    pub async fn price_history(
        &self,
        filter: HistoryFilter,
        value: &str,
        store: Option<String>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> AppResult<Vec<PriceHistory>> {
        let today = time::today();
        let span = Months::new(self.history_span_years * 12);
        let start = start.unwrap_or_else(|| today.checked_sub_months(span).unwrap_or(today));
        let end = end.unwrap_or_else(|| today.checked_add_months(span).unwrap_or(today));

        let mut query = ProductQuery {
            store,
            date_range: Some((start, end)),
            ..ProductQuery::default()
        };
        match filter {
            HistoryFilter::Name => query.name = Some(value.to_string()),
            HistoryFilter::Category => query.category = Some(value.to_string()),
            HistoryFilter::Brand => query.brand = Some(value.to_string()),
        }
        let snapshots = self.store.find_products(&query).await?;

        // find_products is date-ascending, so each series already is
        let mut series: BTreeMap<(String, String), Vec<PricePoint>> = BTreeMap::new();
        for product in snapshots {
            series
                .entry((product.name, product.store))
                .or_default()
                .push(PricePoint {
                    date: product.price_date,
                    price: product.price,
                });
        }
        Ok(series
            .into_iter()
            .map(|((product_name, store), price_history)| PriceHistory {
                product_name,
                store,
                price_history,
            })
            .collect())
    }
}
