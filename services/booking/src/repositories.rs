//! Repositories for database operations

use async_trait::async_trait;
use common::error::DatabaseResult;

use crate::models::{Reservation, ReservationDate, ReservationStatus};

#[cfg(test)]
pub mod memory;
pub mod reservation;

/// Access to bookable dates and the reservations referencing them
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Fetch one bookable date, `None` when no row has this id
    async fn get_date_by_id(&self, id: i64) -> DatabaseResult<Option<ReservationDate>>;

    /// Set the status of one reservation and return the number of matched rows
    async fn set_reservation_status(&self, id: i64, status: ReservationStatus)
    -> DatabaseResult<u64>;

    /// All bookable dates, earliest first
    async fn list_dates(&self) -> DatabaseResult<Vec<ReservationDate>>;

    /// Reservations, newest first, optionally restricted to one status
    async fn list_reservations(
        &self,
        status: Option<ReservationStatus>,
    ) -> DatabaseResult<Vec<Reservation>>;
}
