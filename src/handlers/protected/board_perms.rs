use axum::{extract::State, Extension};

use crate::api::Payload;
use crate::database::models::Permission;
use crate::middleware::{ApiJson, ApiPath, ApiResponse, ApiResult, AuthUser};
use crate::routes::AppState;

/// POST /api/v1/projects/:pid/boards/:bid/permissions/:memberId - Add a board member
///
/// The member must already belong to the project. An all-false body grants
/// the board's default permissions.
///
/// Expected Output:
/// ```json
/// { "code": 200, "message": "OK", "data": { "Board permissions id": 1 } }
/// ```
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath((project_id, board_id, member_id)): ApiPath<(i64, i64, i64)>,
    ApiJson(permissions): ApiJson<Permission>,
) -> ApiResult<Payload> {
    let payload = state
        .services
        .board_perms
        .create(user.user_id, project_id, board_id, member_id, permissions)
        .await?;
    Ok(ApiResponse::success(payload))
}

/// GET /api/v1/projects/:pid/boards/:bid/permissions
pub async fn get_all(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath((project_id, board_id)): ApiPath<(i64, i64)>,
) -> ApiResult<Payload> {
    let payload = state
        .services
        .board_perms
        .get_all(user.user_id, project_id, board_id)
        .await?;
    Ok(ApiResponse::success(payload))
}

/// GET /api/v1/projects/:pid/boards/:bid/permissions/:memberId
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath((project_id, board_id, member_id)): ApiPath<(i64, i64, i64)>,
) -> ApiResult<Payload> {
    let payload = state
        .services
        .board_perms
        .get(user.user_id, project_id, board_id, member_id)
        .await?;
    Ok(ApiResponse::success(payload))
}

/// PUT /api/v1/projects/:pid/boards/:bid/permissions/:memberId
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath((project_id, board_id, member_id)): ApiPath<(i64, i64, i64)>,
    ApiJson(permissions): ApiJson<Permission>,
) -> ApiResult<Payload> {
    let payload = state
        .services
        .board_perms
        .update(user.user_id, project_id, board_id, member_id, permissions)
        .await?;
    Ok(ApiResponse::success(payload))
}

/// DELETE /api/v1/projects/:pid/boards/:bid/permissions/:memberId
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath((project_id, board_id, member_id)): ApiPath<(i64, i64, i64)>,
) -> ApiResult<Payload> {
    let payload = state
        .services
        .board_perms
        .delete(user.user_id, project_id, board_id, member_id)
        .await?;
    Ok(ApiResponse::success(payload))
}
