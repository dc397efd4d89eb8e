use axum::{extract::Path, Extension, Json};
use uuid::Uuid;

use crate::api::serializers::{TripPatch, TripPayload, TripResponse};
use crate::database::models::Trip;
use crate::error::ApiError;
use crate::handlers::require_user;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::permissions::{self, Action};
use crate::services::TripService;

/// GET /api/trip/:trip_id - trip detail
///
/// Visibility filtering applies here just like on the list route, so a
/// private trip owned by someone else is a 404 rather than a 403.
pub async fn record_get(
    user: Option<Extension<AuthUser>>,
    Path(trip_id): Path<Uuid>,
) -> ApiResult<TripResponse> {
    let viewer = user.map(|Extension(u)| u.user_id);

    let service = TripService::new().await?;
    let trip = fetch_or_404(&service, viewer, trip_id).await?;

    Ok(ApiResponse::success(TripResponse::from(&trip)))
}

/// PUT /api/trip/:trip_id - full update, author only
pub async fn record_put(
    user: Option<Extension<AuthUser>>,
    Path(trip_id): Path<Uuid>,
    Json(payload): Json<TripPayload>,
) -> ApiResult<TripResponse> {
    let user = require_user(user)?;
    payload.validate()?;

    let service = TripService::new().await?;
    let trip = fetch_or_404(&service, Some(user.user_id), trip_id).await?;
    check_author(&user, &trip)?;

    let updated = service.update(trip.id, &payload).await?;
    Ok(ApiResponse::success(TripResponse::from(&updated)))
}

/// PATCH /api/trip/:trip_id - partial update, author only
pub async fn record_patch(
    user: Option<Extension<AuthUser>>,
    Path(trip_id): Path<Uuid>,
    Json(patch): Json<TripPatch>,
) -> ApiResult<TripResponse> {
    let user = require_user(user)?;
    patch.validate()?;

    let service = TripService::new().await?;
    let trip = fetch_or_404(&service, Some(user.user_id), trip_id).await?;
    check_author(&user, &trip)?;

    let updated = service.update(trip.id, &patch.apply(&trip)).await?;
    Ok(ApiResponse::success(TripResponse::from(&updated)))
}

/// DELETE /api/trip/:trip_id - author only; days cascade
pub async fn record_delete(
    user: Option<Extension<AuthUser>>,
    Path(trip_id): Path<Uuid>,
) -> ApiResult<()> {
    let user = require_user(user)?;

    let service = TripService::new().await?;
    let trip = fetch_or_404(&service, Some(user.user_id), trip_id).await?;
    check_author(&user, &trip)?;

    service.delete(trip.id).await?;
    Ok(ApiResponse::<()>::no_content())
}

async fn fetch_or_404(
    service: &TripService,
    viewer: Option<Uuid>,
    trip_id: Uuid,
) -> Result<Trip, ApiError> {
    service
        .fetch_visible(viewer, trip_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Trip not found"))
}

fn check_author(user: &AuthUser, trip: &Trip) -> Result<(), ApiError> {
    if !permissions::allows(Some(user.user_id), trip, Action::Modify) {
        return Err(ApiError::forbidden("Only the author can modify this trip"));
    }
    Ok(())
}
