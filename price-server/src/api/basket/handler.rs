//! Basket API handlers

use axum::Json;
use axum::extract::{Query, State};
use chrono::NaiveDate;
use serde::Deserialize;

use shared::dto::{BasketItem, OptimizedBasket};

use crate::core::ServerState;
use crate::utils::{time, AppError, AppResult};

#[derive(Deserialize, Default)]
pub struct OptimizeParams {
    pub date: Option<NaiveDate>,
}

/// POST /api/basket/optimize?date=... - cheapest store split for a
/// list of basket items (today's snapshots when date omitted)
pub async fn optimize(
    State(state): State<ServerState>,
    Query(params): Query<OptimizeParams>,
    Json(items): Json<Vec<BasketItem>>,
) -> AppResult<Json<OptimizedBasket>> {
    for item in &items {
        if item.product_name.trim().is_empty() {
            return Err(AppError::validation("Basket item product_name must not be blank"));
        }
        if item.quantity == 0 {
            return Err(AppError::validation(format!(
                "Basket item '{}' quantity must be >= 1",
                item.product_name
            )));
        }
    }
    let date = params.date.unwrap_or_else(time::today);
    Ok(Json(state.basket.optimize(&items, date).await?))
}
