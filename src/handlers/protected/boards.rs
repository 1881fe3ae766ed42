use axum::{extract::State, Extension};

use crate::api::Payload;
use crate::database::models::{CreateBoard, UpdateBoard};
use crate::middleware::{ApiJson, ApiPath, ApiResponse, ApiResult, AuthUser};
use crate::routes::AppState;

/// POST /api/v1/projects/:pid/boards
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath(project_id): ApiPath<i64>,
    ApiJson(input): ApiJson<CreateBoard>,
) -> ApiResult<Payload> {
    let payload = state.services.boards.create(user.user_id, project_id, input).await?;
    Ok(ApiResponse::success(payload))
}

/// GET /api/v1/projects/:pid/boards
pub async fn get_all(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath(project_id): ApiPath<i64>,
) -> ApiResult<Payload> {
    let payload = state.services.boards.get_all(user.user_id, project_id).await?;
    Ok(ApiResponse::success(payload))
}

/// GET /api/v1/projects/:pid/boards/:bid
pub async fn get_by_id(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath((project_id, board_id)): ApiPath<(i64, i64)>,
) -> ApiResult<Payload> {
    let payload = state.services.boards.get_by_id(user.user_id, project_id, board_id).await?;
    Ok(ApiResponse::success(payload))
}

/// PUT /api/v1/projects/:pid/boards/:bid
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath((project_id, board_id)): ApiPath<(i64, i64)>,
    ApiJson(input): ApiJson<UpdateBoard>,
) -> ApiResult<Payload> {
    let payload = state
        .services
        .boards
        .update(user.user_id, project_id, board_id, input)
        .await?;
    Ok(ApiResponse::success(payload))
}

/// DELETE /api/v1/projects/:pid/boards/:bid
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath((project_id, board_id)): ApiPath<(i64, i64)>,
) -> ApiResult<Payload> {
    let payload = state.services.boards.delete(user.user_id, project_id, board_id).await?;
    Ok(ApiResponse::success(payload))
}
