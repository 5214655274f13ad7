//! Data ingestion API handlers

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use shared::dto::{ImportReport, TriggeredAlert};

use crate::core::ServerState;
use crate::utils::AppResult;

#[derive(Deserialize)]
pub struct ImportParams {
    pub directory_path: String,
}

#[derive(Serialize)]
pub struct ImportResponse {
    pub message: String,
    pub counts: ImportReport,
    pub alerts_triggered: usize,
    /// Alerts that fired against the freshly imported data
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub triggered_alerts: Vec<TriggeredAlert>,
}

/// POST /api/data/import?directory_path=... - import a snapshot
/// directory, then evaluate all active price alerts against it
pub async fn import(
    State(state): State<ServerState>,
    Query(params): Query<ImportParams>,
) -> AppResult<Json<ImportResponse>> {
    let counts = state.importer.import_from(&params.directory_path).await?;
    let triggered_alerts = state.alerts.evaluate_all().await?;
    Ok(Json(ImportResponse {
        message: format!(
            "Imported {} file(s), skipped {}",
            counts.files_processed, counts.files_skipped
        ),
        alerts_triggered: triggered_alerts.len(),
        counts,
        triggered_alerts,
    }))
}
