//! PostgreSQL reservation repository

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;

use super::ReservationStore;
use crate::models::{Reservation, ReservationDate, ReservationStatus};

/// Reservation repository backed by PostgreSQL
#[derive(Clone)]
pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    /// Create a new reservation repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn date_from_row(row: &PgRow) -> Result<ReservationDate, sqlx::Error> {
    Ok(ReservationDate {
        id: row.try_get("id")?,
        start_date: row.try_get("start_date")?,
        end_date: row.try_get("end_date")?,
        price: row.try_get("price")?,
        spots: row.try_get("spots")?,
    })
}

fn reservation_from_row(row: &PgRow) -> Result<Reservation, sqlx::Error> {
    let status: String = row.try_get("status")?;

    Ok(Reservation {
        id: row.try_get("id")?,
        date_id: row.try_get("date_id")?,
        status: status
            .parse()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl ReservationStore for ReservationRepository {
    async fn get_date_by_id(&self, id: i64) -> DatabaseResult<Option<ReservationDate>> {
        info!("Finding reservation date by ID: {}", id);

        let row = sqlx::query(
            r#"
            SELECT id, start_date, end_date, price, spots
            FROM reservation_dates
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref()
            .map(date_from_row)
            .transpose()
            .map_err(DatabaseError::Query)
    }

    async fn set_reservation_status(
        &self,
        id: i64,
        status: ReservationStatus,
    ) -> DatabaseResult<u64> {
        info!("Setting reservation {} status to {}", id, status);

        let result = sqlx::query(
            r#"
            UPDATE reservations
            SET status = $1
            WHERE id = $2
            "#,
        )
        .bind(status.as_str())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn list_dates(&self) -> DatabaseResult<Vec<ReservationDate>> {
        let rows = sqlx::query(
            r#"
            SELECT id, start_date, end_date, price, spots
            FROM reservation_dates
            ORDER BY start_date ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(date_from_row)
            .collect::<Result<_, _>>()
            .map_err(DatabaseError::Query)
    }

    async fn list_reservations(
        &self,
        status: Option<ReservationStatus>,
    ) -> DatabaseResult<Vec<Reservation>> {
        let rows = sqlx::query(
            r#"
            SELECT id, date_id, status, first_name, last_name, email, created_at
            FROM reservations
            WHERE $1::TEXT IS NULL OR status = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(reservation_from_row)
            .collect::<Result<_, _>>()
            .map_err(DatabaseError::Query)
    }
}
