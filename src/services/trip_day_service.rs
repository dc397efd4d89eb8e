use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::TripDay;
use crate::ordering::{self, Shift};

/// CRUD over a trip's days. Every mutation runs in a transaction and keeps
/// the per-trip `order` column dense and zero-based.
pub struct TripDayService {
    pool: PgPool,
}

impl TripDayService {
    pub async fn new() -> Result<Self, DatabaseError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self { pool })
    }

    pub async fn list(&self, trip_id: Uuid) -> Result<Vec<TripDay>, DatabaseError> {
        let days = sqlx::query_as::<_, TripDay>(
            r#"SELECT * FROM trip_days WHERE trip_id = $1 ORDER BY "order""#,
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(days)
    }

    pub async fn fetch(&self, trip_id: Uuid, day_id: Uuid) -> Result<Option<TripDay>, DatabaseError> {
        let day = sqlx::query_as::<_, TripDay>(
            "SELECT * FROM trip_days WHERE id = $1 AND trip_id = $2",
        )
        .bind(day_id)
        .bind(trip_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(day)
    }

    /// Insert a day at the requested position (clamped), shifting later
    /// days up by one. No position appends.
    pub async fn insert(
        &self,
        trip_id: Uuid,
        content: &str,
        position: Option<i32>,
    ) -> Result<TripDay, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let len = Self::count(&mut tx, trip_id).await?;
        let position = ordering::insert_position(position, len);

        sqlx::query(
            r#"
            UPDATE trip_days
            SET "order" = "order" + 1, updated_at = now()
            WHERE trip_id = $1 AND "order" >= $2
            "#,
        )
        .bind(trip_id)
        .bind(position)
        .execute(&mut *tx)
        .await?;

        let day = sqlx::query_as::<_, TripDay>(
            r#"
            INSERT INTO trip_days (id, trip_id, "order", content)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(trip_id)
        .bind(position)
        .bind(content)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(day)
    }

    pub async fn update_content(
        &self,
        day_id: Uuid,
        content: &str,
    ) -> Result<TripDay, DatabaseError> {
        let day = sqlx::query_as::<_, TripDay>(
            r#"
            UPDATE trip_days
            SET content = $1, updated_at = now()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(content)
        .bind(day_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(day)
    }

    /// Move a day to the requested position (clamped into the sequence),
    /// shifting the days in between by one.
    pub async fn move_to(&self, day: &TripDay, to: i32) -> Result<TripDay, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        // Re-read the row inside the transaction; the caller's copy may be
        // stale and the shift range must match the current position.
        let day = sqlx::query_as::<_, TripDay>(
            "SELECT * FROM trip_days WHERE id = $1 FOR UPDATE",
        )
        .bind(day.id)
        .fetch_one(&mut *tx)
        .await?;

        let len = Self::count(&mut tx, day.trip_id).await?;
        let to = ordering::move_target(to, len);

        match ordering::move_shift(day.order, to) {
            Shift::None => {
                tx.commit().await?;
                return Ok(day);
            }
            Shift::Up { lo, hi } => {
                sqlx::query(
                    r#"
                    UPDATE trip_days
                    SET "order" = "order" + 1, updated_at = now()
                    WHERE trip_id = $1 AND "order" BETWEEN $2 AND $3
                    "#,
                )
                .bind(day.trip_id)
                .bind(lo)
                .bind(hi)
                .execute(&mut *tx)
                .await?;
            }
            Shift::Down { lo, hi } => {
                sqlx::query(
                    r#"
                    UPDATE trip_days
                    SET "order" = "order" - 1, updated_at = now()
                    WHERE trip_id = $1 AND "order" BETWEEN $2 AND $3
                    "#,
                )
                .bind(day.trip_id)
                .bind(lo)
                .bind(hi)
                .execute(&mut *tx)
                .await?;
            }
        }

        let moved = sqlx::query_as::<_, TripDay>(
            r#"
            UPDATE trip_days
            SET "order" = $1, updated_at = now()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(to)
        .bind(day.id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(moved)
    }

    /// Remove a day and close the gap it leaves behind
    pub async fn delete(&self, day: &TripDay) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM trip_days WHERE id = $1")
            .bind(day.id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            UPDATE trip_days
            SET "order" = "order" - 1, updated_at = now()
            WHERE trip_id = $1 AND "order" > $2
            "#,
        )
        .bind(day.trip_id)
        .bind(day.order)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn count(tx: &mut Transaction<'_, Postgres>, trip_id: Uuid) -> Result<i32, DatabaseError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM trip_days WHERE trip_id = $1")
            .bind(trip_id)
            .fetch_one(&mut **tx)
            .await?;

        Ok(count.0 as i32)
    }
}
