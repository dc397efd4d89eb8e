use axum::Json;

use crate::api::serializers::{LoginRequest, LoginResponse, UserResponse};
use crate::auth::{generate_jwt, Claims};
use crate::config;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::UserService;

/// POST /auth/login - authenticate and receive a Bearer token
pub async fn login_post(Json(payload): Json<LoginRequest>) -> ApiResult<LoginResponse> {
    let service = UserService::new().await?;

    let user = service
        .authenticate(&payload.email, &payload.password)
        .await?;

    let token = generate_jwt(Claims::new(user.id, user.email.clone()))?;
    let expires_in = config::config().security.jwt_expiry_hours * 3600;

    Ok(ApiResponse::success(LoginResponse {
        token,
        user: UserResponse::from(&user),
        expires_in,
    }))
}
