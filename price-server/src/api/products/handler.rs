//! Product API handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::NaiveDate;
use serde::Deserialize;

use shared::dto::{PriceHistory, ValuePerUnit};
use shared::models::ProductSnapshot;

use crate::core::ServerState;
use crate::products::HistoryFilter;
use crate::utils::{time, AppResult};

#[derive(Deserialize, Default)]
pub struct ListParams {
    pub name: Option<String>,
    pub store: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Deserialize, Default)]
pub struct DateParam {
    pub date: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct HistoryParams {
    /// name | category | brand
    pub filter: String,
    pub value: String,
    pub store: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// GET /api/products?name=...&store=...&date=... - snapshot listing;
/// name or store narrows to one day (today when date omitted)
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<ProductSnapshot>>> {
    let date = params.date.unwrap_or_else(time::today);
    let products = match (&params.name, &params.store) {
        (Some(name), _) => state.products.by_name_and_date(name, date).await?,
        (None, Some(store)) => state.products.by_store_and_date(store, date).await?,
        (None, None) => state.products.all().await?,
    };
    Ok(Json(products))
}

/// GET /api/products/:id - one snapshot by internal id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ProductSnapshot>> {
    Ok(Json(state.products.by_id(id).await?))
}

/// GET /api/products/value?date=... - price per package unit, sorted
/// by (name, value)
pub async fn value_per_unit(
    State(state): State<ServerState>,
    Query(params): Query<DateParam>,
) -> AppResult<Json<Vec<ValuePerUnit>>> {
    let date = params.date.unwrap_or_else(time::today);
    Ok(Json(state.products.value_per_unit(date).await?))
}

/// GET /api/products/history?filter=name&value=... - price series per
/// (product, store) over a date range
pub async fn price_history(
    State(state): State<ServerState>,
    Query(params): Query<HistoryParams>,
) -> AppResult<Json<Vec<PriceHistory>>> {
    let filter = HistoryFilter::parse(&params.filter)?;
    let series = state
        .products
        .price_history(
            filter,
            &params.value,
            params.store,
            params.start_date,
            params.end_date,
        )
        .await?;
    Ok(Json(series))
}
