//! Alert API handlers

use axum::Json;
use axum::extract::{Path, State};

use shared::dto::TriggeredAlert;
use shared::models::{Alert, AlertCreate};

use crate::core::ServerState;
use crate::utils::{ok_with_message, AppError, AppResponse, AppResult};

/// GET /api/alerts - all alerts, active and inactive
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Alert>>> {
    Ok(Json(state.alerts.all().await?))
}

/// POST /api/alerts - create a batch of active alerts
pub async fn create(
    State(state): State<ServerState>,
    Json(payloads): Json<Vec<AlertCreate>>,
) -> AppResult<Json<Vec<Alert>>> {
    for payload in &payloads {
        if payload.product_name.trim().is_empty() {
            return Err(AppError::validation("Alert product_name must not be blank"));
        }
        if payload.store.trim().is_empty() {
            return Err(AppError::validation("Alert store must not be blank"));
        }
        if payload.target_price <= 0.0 {
            return Err(AppError::validation(format!(
                "Alert target_price must be positive, got {}",
                payload.target_price
            )));
        }
    }
    Ok(Json(state.alerts.create(payloads).await?))
}

/// PUT /api/alerts/:id/activate - re-arm an alert
pub async fn activate(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Alert>>> {
    let alert = state.alerts.activate(id).await?;
    Ok(ok_with_message(alert, "Price alert activated"))
}

/// PUT /api/alerts/:id/deactivate - disarm an alert
pub async fn deactivate(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Alert>>> {
    let alert = state.alerts.deactivate(id).await?;
    Ok(ok_with_message(alert, "Price alert deactivated"))
}

/// POST /api/alerts/evaluate - evaluate all active alerts now
pub async fn evaluate(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<TriggeredAlert>>> {
    Ok(Json(state.alerts.evaluate_all().await?))
}
