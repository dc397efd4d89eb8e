//! Ownership and visibility rules for trips.
//!
//! Reads are open to anyone who can see the trip (public, or their own);
//! writes are restricted to the author. Day endpoints evaluate the parent
//! trip. Visibility is also applied at query level by the services, so a
//! trip the caller cannot see fetches as absent (404) rather than 403.

use uuid::Uuid;

use crate::database::models::Trip;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// GET and other safe methods
    View,
    /// Create/update/delete on the object
    Modify,
}

/// Object-level permission check. `viewer` is `None` for anonymous requests.
pub fn allows(viewer: Option<Uuid>, trip: &Trip, action: Action) -> bool {
    let is_author = viewer == Some(trip.author_id);

    match action {
        Action::View => is_author || trip.is_public,
        Action::Modify => is_author,
    }
}

/// Query-level visibility: own trips plus public ones.
pub fn visible_to(viewer: Option<Uuid>, trip: &Trip) -> bool {
    allows(viewer, trip, Action::View)
}
