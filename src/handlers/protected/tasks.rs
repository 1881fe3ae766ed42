use axum::{extract::State, Extension};

use crate::api::Payload;
use crate::database::models::{CreateTask, UpdateTask};
use crate::middleware::{ApiJson, ApiPath, ApiResponse, ApiResult, AuthUser};
use crate::routes::AppState;

/// POST /api/v1/projects/:pid/boards/:bid/lists/:lid/tasks - Append a task to the list
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath((project_id, board_id, list_id)): ApiPath<(i64, i64, i64)>,
    ApiJson(input): ApiJson<CreateTask>,
) -> ApiResult<Payload> {
    let payload = state
        .services
        .tasks
        .create(user.user_id, project_id, board_id, list_id, input)
        .await?;
    Ok(ApiResponse::success(payload))
}

/// GET /api/v1/projects/:pid/boards/:bid/lists/:lid/tasks - Ordered by position
pub async fn get_all(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath((project_id, board_id, list_id)): ApiPath<(i64, i64, i64)>,
) -> ApiResult<Payload> {
    let payload = state
        .services
        .tasks
        .get_all(user.user_id, project_id, board_id, list_id)
        .await?;
    Ok(ApiResponse::success(payload))
}

/// GET /api/v1/projects/:pid/boards/:bid/lists/:lid/tasks/:tid
pub async fn get_by_id(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath((project_id, board_id, list_id, task_id)): ApiPath<(i64, i64, i64, i64)>,
) -> ApiResult<Payload> {
    let payload = state
        .services
        .tasks
        .get_by_id(user.user_id, project_id, board_id, list_id, task_id)
        .await?;
    Ok(ApiResponse::success(payload))
}

/// PUT /api/v1/projects/:pid/boards/:bid/lists/:lid/tasks/:tid
///
/// Expected Input (every field optional; `listId` moves the task):
/// ```json
/// { "title": "Ship it", "position": 0, "listId": 3 }
/// ```
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath((project_id, board_id, list_id, task_id)): ApiPath<(i64, i64, i64, i64)>,
    ApiJson(input): ApiJson<UpdateTask>,
) -> ApiResult<Payload> {
    let payload = state
        .services
        .tasks
        .update(user.user_id, project_id, board_id, list_id, task_id, input)
        .await?;
    Ok(ApiResponse::success(payload))
}

/// DELETE /api/v1/projects/:pid/boards/:bid/lists/:lid/tasks/:tid
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath((project_id, board_id, list_id, task_id)): ApiPath<(i64, i64, i64, i64)>,
) -> ApiResult<Payload> {
    let payload = state
        .services
        .tasks
        .delete(user.user_id, project_id, board_id, list_id, task_id)
        .await?;
    Ok(ApiResponse::success(payload))
}
