use axum::Extension;

use crate::api::serializers::UserResponse;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::UserService;

/// GET /api/auth/whoami - the account behind the presented token
pub async fn whoami_get(Extension(auth): Extension<AuthUser>) -> ApiResult<UserResponse> {
    let service = UserService::new().await?;

    // A valid token for a deleted or deactivated account is still a 401
    let user = service
        .fetch(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Account no longer exists"))?;

    Ok(ApiResponse::success(UserResponse::from(&user)))
}
