//! Discount API handlers

use axum::Json;
use axum::extract::{Query, State};
use chrono::NaiveDate;
use serde::Deserialize;

use shared::dto::BestDiscount;
use shared::models::DiscountSnapshot;

use crate::core::ServerState;
use crate::utils::{time, AppError, AppResult};

#[derive(Deserialize, Default)]
pub struct DateParam {
    pub date: Option<NaiveDate>,
}

#[derive(Deserialize, Default)]
pub struct BestParams {
    pub date: Option<NaiveDate>,
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
pub struct RecentParams {
    pub days_back: Option<u32>,
}

/// GET /api/discounts - every stored discount snapshot
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DiscountSnapshot>>> {
    Ok(Json(state.discounts.all().await?))
}

/// GET /api/discounts/current?date=... - discounts active on a date
/// (today when omitted)
pub async fn current(
    State(state): State<ServerState>,
    Query(params): Query<DateParam>,
) -> AppResult<Json<Vec<DiscountSnapshot>>> {
    let date = params.date.unwrap_or_else(time::today);
    Ok(Json(state.discounts.current(date).await?))
}

/// GET /api/discounts/best?date=...&limit=... - highest active
/// percentage per (product, brand), sorted descending
pub async fn best(
    State(state): State<ServerState>,
    Query(params): Query<BestParams>,
) -> AppResult<Json<Vec<BestDiscount>>> {
    let date = params.date.unwrap_or_else(time::today);
    let limit = match params.limit {
        Some(l) if l < 0 => {
            return Err(AppError::validation(format!("limit must be >= 0, got {l}")));
        }
        Some(l) => l as usize,
        None => state.config.best_discount_default_limit,
    };
    Ok(Json(state.discounts.best(date, limit).await?))
}

/// GET /api/discounts/new?days_back=... - discounts first seen within
/// the last N days (1 when omitted)
pub async fn recently_added(
    State(state): State<ServerState>,
    Query(params): Query<RecentParams>,
) -> AppResult<Json<Vec<DiscountSnapshot>>> {
    let days_back = params.days_back.unwrap_or(1);
    Ok(Json(state.discounts.recently_added(days_back).await?))
}
