//! Trip day endpoints. All routes are nested under the parent trip and
//! permissions delegate to it: whoever may view the trip may view its
//! days, and only the trip author may change them.
pub mod collection;
pub mod record;

pub use collection::{collection_get, collection_post};
pub use record::{record_delete, record_get, record_move, record_patch, record_put};

use uuid::Uuid;

use crate::database::models::Trip;
use crate::error::ApiError;
use crate::permissions::{self, Action};
use crate::services::TripService;

/// Load the parent trip and run the delegated permission check. Invisible
/// trips 404; visible trips the caller may not modify 403.
pub(crate) async fn load_trip(
    viewer: Option<Uuid>,
    trip_id: Uuid,
    action: Action,
) -> Result<Trip, ApiError> {
    let service = TripService::new().await?;

    let trip = service
        .fetch_visible(viewer, trip_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Trip not found"))?;

    if !permissions::allows(viewer, &trip, action) {
        return Err(ApiError::forbidden(
            "Only the trip author can modify its days",
        ));
    }

    Ok(trip)
}
