use axum::{extract::Path, Extension, Json};
use uuid::Uuid;

use crate::api::serializers::{TripDayCreate, TripDayResponse};
use crate::handlers::require_user;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::permissions::Action;
use crate::services::TripDayService;

use super::load_trip;

/// GET /api/trip/:trip_id/day - days of a visible trip, in order
pub async fn collection_get(
    user: Option<Extension<AuthUser>>,
    Path(trip_id): Path<Uuid>,
) -> ApiResult<Vec<TripDayResponse>> {
    let viewer = user.map(|Extension(u)| u.user_id);
    let trip = load_trip(viewer, trip_id, Action::View).await?;

    let service = TripDayService::new().await?;
    let days = service.list(trip.id).await?;

    Ok(ApiResponse::success(
        days.iter().map(TripDayResponse::from).collect(),
    ))
}

/// POST /api/trip/:trip_id/day - insert a day, appending by default
pub async fn collection_post(
    user: Option<Extension<AuthUser>>,
    Path(trip_id): Path<Uuid>,
    Json(payload): Json<TripDayCreate>,
) -> ApiResult<TripDayResponse> {
    let user = require_user(user)?;
    let trip = load_trip(Some(user.user_id), trip_id, Action::Modify).await?;

    let service = TripDayService::new().await?;
    let day = service
        .insert(trip.id, &payload.content, payload.position)
        .await?;

    Ok(ApiResponse::created(TripDayResponse::from(&day)))
}
