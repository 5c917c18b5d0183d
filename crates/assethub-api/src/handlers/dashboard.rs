//! Dashboard handlers.

use axum::Json;
use axum::extract::State;
use chrono::Utc;

use assethub_service::dashboard::DashboardStats;

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/dashboard/stats
pub async fn stats(State(state): State<AppState>) -> ApiResult<Json<ApiResponse<DashboardStats>>> {
    let stats = state.dashboard_service.stats(Utc::now()).await?;
    Ok(Json(ApiResponse::ok(stats)))
}
