use axum::Json;

use crate::api::serializers::{RegisterRequest, UserResponse};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::UserService;

/// POST /auth/register - create a new account
///
/// The email is normalized (domain lowercased) and must be unique; the
/// password is stored as a bcrypt hash.
pub async fn register_post(Json(payload): Json<RegisterRequest>) -> ApiResult<UserResponse> {
    let service = UserService::new().await?;

    let user = service
        .register(&payload.email, &payload.password, &payload.name)
        .await?;

    Ok(ApiResponse::created(UserResponse::from(&user)))
}
