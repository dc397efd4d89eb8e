use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One day of a trip itinerary. `order` values within a trip are always
/// dense and zero-based: 0..n-1 with no gaps or duplicates.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TripDay {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub order: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
