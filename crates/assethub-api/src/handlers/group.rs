//! Main group and sub group handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use validator::Validate;

use assethub_core::types::id::{MainGroupId, SubGroupId};
use assethub_entity::{MainGroup, SubGroup};
use assethub_service::group::GroupWithChildren;

use crate::dto::request::{CreateSubGroupBody, GroupBody, UpdateSubGroupBody};
use crate::dto::response::{ApiResponse, DeletedResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/groups
pub async fn list_groups(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<GroupWithChildren>>>> {
    let groups = state.group_service.list_groups().await?;
    Ok(Json(ApiResponse::ok(groups)))
}

/// POST /api/groups
pub async fn create_group(
    State(state): State<AppState>,
    Json(body): Json<GroupBody>,
) -> ApiResult<(StatusCode, Json<ApiResponse<MainGroup>>)> {
    body.validate()?;
    let group = state
        .group_service
        .create_main_group(body.name, body.icon)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(group))))
}

/// PUT /api/groups/{id}
pub async fn update_group(
    State(state): State<AppState>,
    Path(id): Path<MainGroupId>,
    Json(body): Json<GroupBody>,
) -> ApiResult<Json<ApiResponse<MainGroup>>> {
    body.validate()?;
    let group = state
        .group_service
        .update_main_group(id, body.into())
        .await?;
    Ok(Json(ApiResponse::ok(group)))
}

/// DELETE /api/groups/{id}
pub async fn delete_group(
    State(state): State<AppState>,
    Path(id): Path<MainGroupId>,
) -> ApiResult<Json<serde_json::Value>> {
    state.group_service.delete_main_group(id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// POST /api/groups/{id}/copy
pub async fn copy_group(
    State(state): State<AppState>,
    Path(id): Path<MainGroupId>,
) -> ApiResult<(StatusCode, Json<ApiResponse<GroupWithChildren>>)> {
    let group = state.group_service.copy_main_group(id).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(group))))
}

/// POST /api/groups/{id}/subgroups
pub async fn create_sub_group(
    State(state): State<AppState>,
    Path(parent): Path<MainGroupId>,
    Json(body): Json<CreateSubGroupBody>,
) -> ApiResult<(StatusCode, Json<ApiResponse<SubGroup>>)> {
    body.validate()?;
    let sub = state
        .group_service
        .create_sub_group(parent, body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(sub))))
}

/// PUT /api/subgroups/{id}
pub async fn update_sub_group(
    State(state): State<AppState>,
    Path(id): Path<SubGroupId>,
    Json(body): Json<UpdateSubGroupBody>,
) -> ApiResult<Json<ApiResponse<SubGroup>>> {
    body.validate()?;
    let sub = state.group_service.update_sub_group(id, body.into()).await?;
    Ok(Json(ApiResponse::ok(sub)))
}

/// DELETE /api/subgroups/{id}
pub async fn delete_sub_group(
    State(state): State<AppState>,
    Path(id): Path<SubGroupId>,
) -> ApiResult<Json<ApiResponse<DeletedResponse>>> {
    let deleted_assets = state.group_service.delete_sub_group(id).await?;
    Ok(Json(ApiResponse::ok(DeletedResponse { deleted_assets })))
}

/// POST /api/subgroups/{id}/copy
pub async fn copy_sub_group(
    State(state): State<AppState>,
    Path(id): Path<SubGroupId>,
) -> ApiResult<(StatusCode, Json<ApiResponse<SubGroup>>)> {
    let sub = state.group_service.copy_sub_group(id).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(sub))))
}
