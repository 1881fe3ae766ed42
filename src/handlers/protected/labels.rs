use axum::{extract::State, Extension};

use crate::api::Payload;
use crate::database::models::{CreateLabel, UpdateLabel};
use crate::middleware::{ApiJson, ApiPath, ApiResponse, ApiResult, AuthUser};
use crate::routes::AppState;
use crate::services::TaskPath;

/// POST /api/v1/projects/:pid/boards/:bid/labels
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath((project_id, board_id)): ApiPath<(i64, i64)>,
    ApiJson(input): ApiJson<CreateLabel>,
) -> ApiResult<Payload> {
    let payload = state
        .services
        .labels
        .create(user.user_id, project_id, board_id, input)
        .await?;
    Ok(ApiResponse::success(payload))
}

/// GET /api/v1/projects/:pid/boards/:bid/labels
pub async fn get_all(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath((project_id, board_id)): ApiPath<(i64, i64)>,
) -> ApiResult<Payload> {
    let payload = state.services.labels.get_all(user.user_id, project_id, board_id).await?;
    Ok(ApiResponse::success(payload))
}

/// GET /api/v1/projects/:pid/boards/:bid/labels/:labelId
pub async fn get_by_id(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath((project_id, board_id, label_id)): ApiPath<(i64, i64, i64)>,
) -> ApiResult<Payload> {
    let payload = state
        .services
        .labels
        .get_by_id(user.user_id, project_id, board_id, label_id)
        .await?;
    Ok(ApiResponse::success(payload))
}

/// PUT /api/v1/projects/:pid/boards/:bid/labels/:labelId
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath((project_id, board_id, label_id)): ApiPath<(i64, i64, i64)>,
    ApiJson(input): ApiJson<UpdateLabel>,
) -> ApiResult<Payload> {
    let payload = state
        .services
        .labels
        .update(user.user_id, project_id, board_id, label_id, input)
        .await?;
    Ok(ApiResponse::success(payload))
}

/// DELETE /api/v1/projects/:pid/boards/:bid/labels/:labelId
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath((project_id, board_id, label_id)): ApiPath<(i64, i64, i64)>,
) -> ApiResult<Payload> {
    let payload = state
        .services
        .labels
        .delete(user.user_id, project_id, board_id, label_id)
        .await?;
    Ok(ApiResponse::success(payload))
}

/// POST /api/v1/projects/:pid/boards/:bid/lists/:lid/tasks/:tid/labels/:labelId
pub async fn attach(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath((project_id, board_id, list_id, task_id, label_id)): ApiPath<(i64, i64, i64, i64, i64)>,
) -> ApiResult<Payload> {
    let path = TaskPath { project_id, board_id, list_id, task_id };
    let payload = state.services.labels.attach(user.user_id, path, label_id).await?;
    Ok(ApiResponse::success(payload))
}

/// GET /api/v1/projects/:pid/boards/:bid/lists/:lid/tasks/:tid/labels
pub async fn get_for_task(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath((project_id, board_id, list_id, task_id)): ApiPath<(i64, i64, i64, i64)>,
) -> ApiResult<Payload> {
    let path = TaskPath { project_id, board_id, list_id, task_id };
    let payload = state.services.labels.get_for_task(user.user_id, path).await?;
    Ok(ApiResponse::success(payload))
}

/// DELETE /api/v1/projects/:pid/boards/:bid/lists/:lid/tasks/:tid/labels/:labelId
pub async fn detach(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath((project_id, board_id, list_id, task_id, label_id)): ApiPath<(i64, i64, i64, i64, i64)>,
) -> ApiResult<Payload> {
    let path = TaskPath { project_id, board_id, list_id, task_id };
    let payload = state.services.labels.detach(user.user_id, path, label_id).await?;
    Ok(ApiResponse::success(payload))
}
