//! Notification settings handlers.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use assethub_entity::NotificationSettings;

use crate::dto::request::UpdateSettingsBody;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/settings/notifications
pub async fn get_settings(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<NotificationSettings>>> {
    let settings = state.settings_service.get_settings().await?;
    Ok(Json(ApiResponse::ok(settings)))
}

/// PUT /api/settings/notifications
pub async fn update_settings(
    State(state): State<AppState>,
    Json(body): Json<UpdateSettingsBody>,
) -> ApiResult<Json<ApiResponse<NotificationSettings>>> {
    body.validate()?;
    let settings = state.settings_service.update_settings(body.into()).await?;
    Ok(Json(ApiResponse::ok(settings)))
}
