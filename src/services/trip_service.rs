use sqlx::PgPool;
use uuid::Uuid;

use crate::api::serializers::TripPayload;
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::Trip;

pub struct TripService {
    pool: PgPool,
}

impl TripService {
    pub async fn new() -> Result<Self, DatabaseError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self { pool })
    }

    /// List trips visible to the caller: public trips, plus the caller's
    /// own when authenticated. Anonymous callers see public trips only.
    pub async fn list_visible(&self, viewer: Option<Uuid>) -> Result<Vec<Trip>, DatabaseError> {
        let trips = match viewer {
            Some(user_id) => {
                sqlx::query_as::<_, Trip>(
                    r#"
                    SELECT * FROM trips
                    WHERE author_id = $1 OR is_public = TRUE
                    ORDER BY created_at
                    "#,
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Trip>(
                    "SELECT * FROM trips WHERE is_public = TRUE ORDER BY created_at",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(trips)
    }

    /// Fetch one trip with the same visibility filter as the list route.
    /// An invisible trip is indistinguishable from a missing one.
    pub async fn fetch_visible(
        &self,
        viewer: Option<Uuid>,
        id: Uuid,
    ) -> Result<Option<Trip>, DatabaseError> {
        let trip = match viewer {
            Some(user_id) => {
                sqlx::query_as::<_, Trip>(
                    r#"
                    SELECT * FROM trips
                    WHERE id = $1 AND (author_id = $2 OR is_public = TRUE)
                    "#,
                )
                .bind(id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Trip>(
                    "SELECT * FROM trips WHERE id = $1 AND is_public = TRUE",
                )
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
            }
        };

        Ok(trip)
    }

    /// Create a trip owned by `author`. The author always comes from the
    /// authenticated request, never from the payload.
    pub async fn create(&self, author: Uuid, payload: &TripPayload) -> Result<Trip, DatabaseError> {
        let trip = sqlx::query_as::<_, Trip>(
            r#"
            INSERT INTO trips (id, title, author_id, description, is_public)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&payload.title)
        .bind(author)
        .bind(&payload.description)
        .bind(payload.is_public)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("Created trip {} for user {}", trip.id, author);
        Ok(trip)
    }

    pub async fn update(&self, id: Uuid, payload: &TripPayload) -> Result<Trip, DatabaseError> {
        let trip = sqlx::query_as::<_, Trip>(
            r#"
            UPDATE trips
            SET title = $1, description = $2, is_public = $3, updated_at = now()
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(payload.is_public)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(trip)
    }

    /// Delete a trip; its days go with it via ON DELETE CASCADE
    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM trips WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::info!("Deleted trip {}", id);
        Ok(())
    }
}
