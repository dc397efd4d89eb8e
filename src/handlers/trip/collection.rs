use axum::{Extension, Json};

use crate::api::serializers::{TripPayload, TripResponse};
use crate::handlers::require_user;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::TripService;

/// GET /api/trip - list trips visible to the caller
pub async fn collection_get(
    user: Option<Extension<AuthUser>>,
) -> ApiResult<Vec<TripResponse>> {
    let viewer = user.map(|Extension(u)| u.user_id);

    let service = TripService::new().await?;
    let trips = service.list_visible(viewer).await?;

    Ok(ApiResponse::success(
        trips.iter().map(TripResponse::from).collect(),
    ))
}

/// POST /api/trip - create a trip owned by the caller
pub async fn collection_post(
    user: Option<Extension<AuthUser>>,
    Json(payload): Json<TripPayload>,
) -> ApiResult<TripResponse> {
    let user = require_user(user)?;
    payload.validate()?;

    let service = TripService::new().await?;
    let trip = service.create(user.user_id, &payload).await?;

    Ok(ApiResponse::created(TripResponse::from(&trip)))
}
