//! Reservation lifecycle
//!
//! A reservation starts `pending` when it is booked and moves to `approved`
//! once an administrator confirms it. Nothing here moves it back.
//! Confirming does not touch the capacity of the booked date.

use common::error::DatabaseError;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::{
    models::{Reservation, ReservationDate, ReservationStatus},
    repositories::ReservationStore,
};

pub const MISSING_RESERVATION_ID: &str = "ID de la réservation manquant";
pub const INVALID_RESERVATION_ID: &str = "ID de la réservation invalide";
pub const RESERVATION_NOT_FOUND: &str = "Réservation non trouvée";
pub const MISSING_DATE_ID: &str = "ID de la date manquant";
pub const INVALID_DATE_ID: &str = "ID de la date invalide";
pub const DATE_NOT_FOUND: &str = "Date non trouvée";

/// Errors raised by reservation operations
#[derive(Debug, Error)]
pub enum ReservationError {
    #[error("{0}")]
    MissingParameter(&'static str),

    #[error("{0}")]
    InvalidParameter(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: DatabaseError,
    },
}

fn storage(context: &'static str) -> impl FnOnce(DatabaseError) -> ReservationError {
    move |source| ReservationError::Storage { context, source }
}

fn parse_id(
    raw: Option<&str>,
    missing: &'static str,
    invalid: &'static str,
) -> Result<i64, ReservationError> {
    let raw = raw
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or(ReservationError::MissingParameter(missing))?;

    raw.parse()
        .map_err(|_| ReservationError::InvalidParameter(invalid))
}

/// Reservation operations over a store
#[derive(Clone)]
pub struct ReservationLifecycle {
    store: Arc<dyn ReservationStore>,
}

impl ReservationLifecycle {
    pub fn new(store: Arc<dyn ReservationStore>) -> Self {
        Self { store }
    }

    /// Approve a reservation.
    ///
    /// Approving an already approved reservation succeeds again. An id that
    /// matches no reservation is reported as not found.
    pub async fn confirm(&self, raw_id: Option<&str>) -> Result<(), ReservationError> {
        let id = parse_id(raw_id, MISSING_RESERVATION_ID, INVALID_RESERVATION_ID)?;

        let matched = self
            .store
            .set_reservation_status(id, ReservationStatus::Approved)
            .await
            .map_err(storage("Erreur lors de la confirmation de la réservation"))?;

        if matched == 0 {
            return Err(ReservationError::NotFound(RESERVATION_NOT_FOUND));
        }

        info!("Reservation {} approved", id);
        Ok(())
    }

    /// Look up one bookable date
    pub async fn date_info(
        &self,
        raw_id: Option<&str>,
    ) -> Result<ReservationDate, ReservationError> {
        let id = parse_id(raw_id, MISSING_DATE_ID, INVALID_DATE_ID)?;

        self.store
            .get_date_by_id(id)
            .await
            .map_err(storage("Erreur lors de la récupération de la date"))?
            .ok_or(ReservationError::NotFound(DATE_NOT_FOUND))
    }

    pub async fn dates(&self) -> Result<Vec<ReservationDate>, ReservationError> {
        self.store
            .list_dates()
            .await
            .map_err(storage("Erreur lors de la récupération des dates"))
    }

    pub async fn reservations(
        &self,
        status: Option<ReservationStatus>,
    ) -> Result<Vec<Reservation>, ReservationError> {
        self.store
            .list_reservations(status)
            .await
            .map_err(storage("Erreur lors de la récupération des réservations"))
    }
}
