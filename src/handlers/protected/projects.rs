use axum::{extract::State, Extension};

use crate::api::Payload;
use crate::database::models::{CreateProject, UpdateProject};
use crate::middleware::{ApiJson, ApiPath, ApiResponse, ApiResult, AuthUser};
use crate::routes::AppState;

/// POST /api/v1/projects - Create a project owned by the caller
///
/// Expected Input:
/// ```json
/// { "title": "Roadmap", "description": "", "defaultPermissions": { "read": true, "write": false, "admin": false } }
/// ```
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(input): ApiJson<CreateProject>,
) -> ApiResult<Payload> {
    let payload = state.services.projects.create(user.user_id, input).await?;
    Ok(ApiResponse::success(payload))
}

/// GET /api/v1/projects - Projects the caller is a member of
pub async fn get_all(State(state): State<AppState>, Extension(user): Extension<AuthUser>) -> ApiResult<Payload> {
    let payload = state.services.projects.get_all(user.user_id).await?;
    Ok(ApiResponse::success(payload))
}

/// GET /api/v1/projects/:pid
pub async fn get_by_id(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath(project_id): ApiPath<i64>,
) -> ApiResult<Payload> {
    let payload = state.services.projects.get_by_id(user.user_id, project_id).await?;
    Ok(ApiResponse::success(payload))
}

/// PUT /api/v1/projects/:pid
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath(project_id): ApiPath<i64>,
    ApiJson(input): ApiJson<UpdateProject>,
) -> ApiResult<Payload> {
    let payload = state.services.projects.update(user.user_id, project_id, input).await?;
    Ok(ApiResponse::success(payload))
}

/// DELETE /api/v1/projects/:pid
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath(project_id): ApiPath<i64>,
) -> ApiResult<Payload> {
    let payload = state.services.projects.delete(user.user_id, project_id).await?;
    Ok(ApiResponse::success(payload))
}
