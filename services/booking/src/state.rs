//! Application state shared across handlers

use common::identity::AdminVerifier;

use crate::lifecycle::ReservationLifecycle;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub reservations: ReservationLifecycle,
    pub admin_verifier: AdminVerifier,
}
