use axum::{extract::State, Extension};

use crate::api::Payload;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::routes::AppState;

/// GET /api/v1/users - The authenticated user's profile
pub async fn me(State(state): State<AppState>, Extension(user): Extension<AuthUser>) -> ApiResult<Payload> {
    let payload = state.services.users.get(user.user_id).await?;
    Ok(ApiResponse::success(payload))
}
