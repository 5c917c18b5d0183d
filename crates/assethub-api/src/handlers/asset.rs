//! Asset CRUD handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use validator::Validate;

use assethub_core::types::id::AssetId;
use assethub_entity::Asset;
use assethub_service::asset::{AssetListing, DueItem};

use crate::dto::request::{CreateAssetBody, UpdateAssetBody};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/assets
pub async fn list_assets(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<AssetListing>>>> {
    let assets = state.asset_service.list_assets(Utc::now()).await?;
    Ok(Json(ApiResponse::ok(assets)))
}

/// GET /api/assets/{id}
pub async fn get_asset(
    State(state): State<AppState>,
    Path(id): Path<AssetId>,
) -> ApiResult<Json<ApiResponse<Asset>>> {
    let asset = state.asset_service.get_asset(id).await?;
    Ok(Json(ApiResponse::ok(asset)))
}

/// POST /api/assets
pub async fn create_asset(
    State(state): State<AppState>,
    Json(body): Json<CreateAssetBody>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Asset>>)> {
    body.validate()?;
    let asset = state.asset_service.create_asset(body.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(asset))))
}

/// PUT /api/assets/{id}
pub async fn update_asset(
    State(state): State<AppState>,
    Path(id): Path<AssetId>,
    Json(body): Json<UpdateAssetBody>,
) -> ApiResult<Json<ApiResponse<Asset>>> {
    body.validate()?;
    let asset = state.asset_service.update_asset(id, body.into()).await?;
    Ok(Json(ApiResponse::ok(asset)))
}

/// DELETE /api/assets/{id}
pub async fn delete_asset(
    State(state): State<AppState>,
    Path(id): Path<AssetId>,
) -> ApiResult<Json<serde_json::Value>> {
    state.asset_service.delete_asset(id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// POST /api/assets/{id}/copy
pub async fn copy_asset(
    State(state): State<AppState>,
    Path(id): Path<AssetId>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Asset>>)> {
    let asset = state.asset_service.copy_asset(id).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(asset))))
}

/// GET /api/assets/{id}/items
pub async fn due_items(
    State(state): State<AppState>,
    Path(id): Path<AssetId>,
) -> ApiResult<Json<ApiResponse<Vec<DueItem>>>> {
    let items = state.asset_service.due_items(id, Utc::now()).await?;
    Ok(Json(ApiResponse::ok(items)))
}
