//! In-memory reservation store for tests

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use common::error::{DatabaseError, DatabaseResult};
use std::{
    collections::BTreeMap,
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use super::ReservationStore;
use crate::models::{Reservation, ReservationDate, ReservationStatus};

#[derive(Default)]
pub struct InMemoryReservationStore {
    dates: Mutex<BTreeMap<i64, ReservationDate>>,
    reservations: Mutex<BTreeMap<i64, Reservation>>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl InMemoryReservationStore {
    pub fn with_date(self, id: i64, spots: i32) -> Self {
        self.dates.lock().unwrap().insert(
            id,
            ReservationDate {
                id,
                start_date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2026, 7, 8).unwrap(),
                price: 450.0,
                spots,
            },
        );
        self
    }

    pub fn with_reservation(self, id: i64, date_id: i64, status: ReservationStatus) -> Self {
        self.reservations.lock().unwrap().insert(
            id,
            Reservation {
                id,
                date_id,
                status,
                first_name: "Jeanne".to_string(),
                last_name: "Martin".to_string(),
                email: "jeanne.martin@example.com".to_string(),
                created_at: Utc.with_ymd_and_hms(2026, 5, 1, 10, 0, 0).unwrap()
                    + chrono::Duration::minutes(id),
            },
        );
        self
    }

    /// Make every following call fail like a lost connection
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn status_of(&self, id: i64) -> Option<ReservationStatus> {
        self.reservations.lock().unwrap().get(&id).map(|r| r.status)
    }

    pub fn spots_of(&self, id: i64) -> Option<i32> {
        self.dates.lock().unwrap().get(&id).map(|d| d.spots)
    }

    fn enter(&self) -> DatabaseResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(DatabaseError::Query(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl ReservationStore for InMemoryReservationStore {
    async fn get_date_by_id(&self, id: i64) -> DatabaseResult<Option<ReservationDate>> {
        self.enter()?;
        Ok(self.dates.lock().unwrap().get(&id).cloned())
    }

    async fn set_reservation_status(
        &self,
        id: i64,
        status: ReservationStatus,
    ) -> DatabaseResult<u64> {
        self.enter()?;
        match self.reservations.lock().unwrap().get_mut(&id) {
            Some(reservation) => {
                reservation.status = status;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn list_dates(&self) -> DatabaseResult<Vec<ReservationDate>> {
        self.enter()?;
        let mut dates: Vec<_> = self.dates.lock().unwrap().values().cloned().collect();
        dates.sort_by_key(|d| d.start_date);
        Ok(dates)
    }

    async fn list_reservations(
        &self,
        status: Option<ReservationStatus>,
    ) -> DatabaseResult<Vec<Reservation>> {
        self.enter()?;
        let mut reservations: Vec<_> = self
            .reservations
            .lock()
            .unwrap()
            .values()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .cloned()
            .collect();
        reservations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reservations)
    }
}
