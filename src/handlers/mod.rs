// Handler tiers:
//   /auth/*          - public account endpoints (register, login)
//   /api/auth/*      - requires a valid Bearer token
//   /api/trip/*      - optional auth; reads honor visibility, writes
//                      require ownership (see permissions module)
pub mod auth;
pub mod day;
pub mod trip;

use axum::Extension;

use crate::error::ApiError;
use crate::middleware::AuthUser;

/// Writes need a logged-in caller; reads on the same routes do not.
pub(crate) fn require_user(user: Option<Extension<AuthUser>>) -> Result<AuthUser, ApiError> {
    user.map(|Extension(u)| u)
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))
}
