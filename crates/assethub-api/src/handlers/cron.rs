//! External cron trigger.

use axum::Json;
use axum::extract::State;
use chrono::Utc;

use assethub_service::CheckOptions;

use crate::dto::response::CronResponse;
use crate::error::ApiResult;
use crate::extractors::CronCaller;
use crate::state::AppState;

/// GET /api/cron
///
/// Runs one guarded, window-gated cycle. A cycle already in progress makes
/// this a no-op reported as `skipped`.
pub async fn trigger(
    State(state): State<AppState>,
    _caller: CronCaller,
) -> ApiResult<Json<CronResponse>> {
    let timestamp = Utc::now();
    let outcome = state
        .notification_service
        .run_guarded(timestamp, CheckOptions::default())
        .await?;

    tracing::debug!(outcome = %outcome.message(), "Cron trigger handled");
    Ok(Json(CronResponse {
        success: true,
        timestamp,
        result: outcome.into(),
    }))
}
