use axum::{extract::State, Extension};

use crate::api::Payload;
use crate::database::models::{CreateTaskList, UpdateTaskList};
use crate::middleware::{ApiJson, ApiPath, ApiResponse, ApiResult, AuthUser};
use crate::routes::AppState;

/// POST /api/v1/projects/:pid/boards/:bid/lists - Append a list to the board
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath((project_id, board_id)): ApiPath<(i64, i64)>,
    ApiJson(input): ApiJson<CreateTaskList>,
) -> ApiResult<Payload> {
    let payload = state
        .services
        .lists
        .create(user.user_id, project_id, board_id, input)
        .await?;
    Ok(ApiResponse::success(payload))
}

/// GET /api/v1/projects/:pid/boards/:bid/lists - Ordered by position
pub async fn get_all(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath((project_id, board_id)): ApiPath<(i64, i64)>,
) -> ApiResult<Payload> {
    let payload = state.services.lists.get_all(user.user_id, project_id, board_id).await?;
    Ok(ApiResponse::success(payload))
}

/// GET /api/v1/projects/:pid/boards/:bid/lists/:lid
pub async fn get_by_id(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath((project_id, board_id, list_id)): ApiPath<(i64, i64, i64)>,
) -> ApiResult<Payload> {
    let payload = state
        .services
        .lists
        .get_by_id(user.user_id, project_id, board_id, list_id)
        .await?;
    Ok(ApiResponse::success(payload))
}

/// PUT /api/v1/projects/:pid/boards/:bid/lists/:lid
///
/// Expected Input:
/// ```json
/// { "title": "Doing", "position": 0 }
/// ```
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath((project_id, board_id, list_id)): ApiPath<(i64, i64, i64)>,
    ApiJson(input): ApiJson<UpdateTaskList>,
) -> ApiResult<Payload> {
    let payload = state
        .services
        .lists
        .update(user.user_id, project_id, board_id, list_id, input)
        .await?;
    Ok(ApiResponse::success(payload))
}

/// DELETE /api/v1/projects/:pid/boards/:bid/lists/:lid
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath((project_id, board_id, list_id)): ApiPath<(i64, i64, i64)>,
) -> ApiResult<Payload> {
    let payload = state
        .services
        .lists
        .delete(user.user_id, project_id, board_id, list_id)
        .await?;
    Ok(ApiResponse::success(payload))
}
