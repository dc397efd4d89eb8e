use axum::{extract::Path, Extension, Json};
use uuid::Uuid;

use crate::api::serializers::{TripDayMove, TripDayPatch, TripDayPayload, TripDayResponse};
use crate::database::models::TripDay;
use crate::error::ApiError;
use crate::handlers::require_user;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::permissions::Action;
use crate::services::TripDayService;

use super::load_trip;

/// GET /api/trip/:trip_id/day/:day_id
pub async fn record_get(
    user: Option<Extension<AuthUser>>,
    Path((trip_id, day_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<TripDayResponse> {
    let viewer = user.map(|Extension(u)| u.user_id);
    let trip = load_trip(viewer, trip_id, Action::View).await?;

    let service = TripDayService::new().await?;
    let day = fetch_or_404(&service, trip.id, day_id).await?;

    Ok(ApiResponse::success(TripDayResponse::from(&day)))
}

/// PUT /api/trip/:trip_id/day/:day_id - replace the content. The order
/// field is not writable here; use the move endpoint.
pub async fn record_put(
    user: Option<Extension<AuthUser>>,
    Path((trip_id, day_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<TripDayPayload>,
) -> ApiResult<TripDayResponse> {
    let user = require_user(user)?;
    let trip = load_trip(Some(user.user_id), trip_id, Action::Modify).await?;

    let service = TripDayService::new().await?;
    let day = fetch_or_404(&service, trip.id, day_id).await?;

    let updated = service.update_content(day.id, &payload.content).await?;
    Ok(ApiResponse::success(TripDayResponse::from(&updated)))
}

/// PATCH /api/trip/:trip_id/day/:day_id
pub async fn record_patch(
    user: Option<Extension<AuthUser>>,
    Path((trip_id, day_id)): Path<(Uuid, Uuid)>,
    Json(patch): Json<TripDayPatch>,
) -> ApiResult<TripDayResponse> {
    let user = require_user(user)?;
    let trip = load_trip(Some(user.user_id), trip_id, Action::Modify).await?;

    let service = TripDayService::new().await?;
    let day = fetch_or_404(&service, trip.id, day_id).await?;

    let updated = match patch.content {
        Some(content) => service.update_content(day.id, &content).await?,
        None => day,
    };

    Ok(ApiResponse::success(TripDayResponse::from(&updated)))
}

/// POST /api/trip/:trip_id/day/:day_id/move - move the day to a target
/// position; days in between shift by one to keep the order dense
pub async fn record_move(
    user: Option<Extension<AuthUser>>,
    Path((trip_id, day_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<TripDayMove>,
) -> ApiResult<TripDayResponse> {
    let user = require_user(user)?;
    let trip = load_trip(Some(user.user_id), trip_id, Action::Modify).await?;

    let service = TripDayService::new().await?;
    let day = fetch_or_404(&service, trip.id, day_id).await?;

    let moved = service.move_to(&day, request.to).await?;
    Ok(ApiResponse::success(TripDayResponse::from(&moved)))
}

/// DELETE /api/trip/:trip_id/day/:day_id - later days close the gap
pub async fn record_delete(
    user: Option<Extension<AuthUser>>,
    Path((trip_id, day_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<()> {
    let user = require_user(user)?;
    let trip = load_trip(Some(user.user_id), trip_id, Action::Modify).await?;

    let service = TripDayService::new().await?;
    let day = fetch_or_404(&service, trip.id, day_id).await?;

    service.delete(&day).await?;
    Ok(ApiResponse::<()>::no_content())
}

async fn fetch_or_404(
    service: &TripDayService,
    trip_id: Uuid,
    day_id: Uuid,
) -> Result<TripDay, ApiError> {
    service
        .fetch(trip_id, day_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Day not found"))
}
