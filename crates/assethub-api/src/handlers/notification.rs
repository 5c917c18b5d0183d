//! Manual reminder cycle handlers.

use axum::Json;
use axum::extract::{Query, State};
use chrono::Utc;

use crate::dto::request::CheckQuery;
use crate::dto::response::{ApiResponse, CheckResponse, LedgerClearedResponse, TestResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// POST /api/notifications/check?force=&reset=
pub async fn check(
    State(state): State<AppState>,
    Query(query): Query<CheckQuery>,
) -> ApiResult<Json<CheckResponse>> {
    tracing::info!(force = query.force, reset = query.reset, "Manual notification check");
    let outcome = state
        .notification_service
        .run_guarded(Utc::now(), query.into())
        .await?;
    Ok(Json(outcome.into()))
}

/// POST /api/notifications/test
pub async fn test(State(state): State<AppState>) -> ApiResult<Json<TestResponse>> {
    let outcome = state.notification_service.send_test().await?;
    Ok(Json(outcome.into()))
}

/// DELETE /api/notifications/ledger
pub async fn clear_ledger(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<LedgerClearedResponse>>> {
    let removed = state.settings_service.clear_ledger().await?;
    Ok(Json(ApiResponse::ok(LedgerClearedResponse { removed })))
}
