use axum::extract::State;

use crate::api::Payload;
use crate::database::models::{SignInInput, SignUpInput};
use crate::middleware::{ApiJson, ApiResponse, ApiResult};
use crate::routes::AppState;

/// POST /api/v1/users/signup - Register a new user
///
/// Expected Input:
/// ```json
/// { "nickname": "alice", "email": "alice@example.com", "password": "secret" }
/// ```
///
/// Expected Output:
/// ```json
/// { "code": 200, "message": "OK", "data": { "uid": 1 } }
/// ```
pub async fn sign_up(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<SignUpInput>,
) -> ApiResult<Payload> {
    let payload = state.services.users.sign_up(input).await?;
    Ok(ApiResponse::success(payload))
}

/// POST /api/v1/users/signin - Exchange credentials for a bearer token
///
/// Expected Output:
/// ```json
/// { "code": 200, "message": "OK", "data": { "token": "eyJ..." } }
/// ```
pub async fn sign_in(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<SignInInput>,
) -> ApiResult<Payload> {
    let payload = state.services.users.sign_in(input).await?;
    Ok(ApiResponse::success(payload))
}
