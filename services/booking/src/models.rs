//! Booking models for persisted records and request/response payloads

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Bookable date window with its price and remaining capacity
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDate {
    pub id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: f64,
    pub spots: i32,
}

/// Reservation status, `pending` until an admin approves it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Approved,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Approved => "approved",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown reservation status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for ReservationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReservationStatus::Pending),
            "approved" => Ok(ReservationStatus::Approved),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Reservation as listed to administrators
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i64,
    pub date_id: i64,
    pub status: ReservationStatus,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Identifier as sent by the booking front end, either `42` or `"42"`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdParam {
    Number(i64),
    Text(String),
    /// Any other JSON value, reported as an invalid id
    Other(serde_json::Value),
}

impl IdParam {
    /// Raw textual form, `None` when blank
    pub fn as_text(&self) -> Option<String> {
        match self {
            IdParam::Number(n) => Some(n.to_string()),
            IdParam::Text(s) if s.trim().is_empty() => None,
            IdParam::Text(s) => Some(s.trim().to_string()),
            IdParam::Other(value) => Some(value.to_string()),
        }
    }
}

/// Body of a reservation confirmation
#[derive(Debug, Default, Deserialize)]
pub struct ConfirmReservationRequest {
    #[serde(default)]
    pub id: Option<IdParam>,
}

/// Query of the date lookup endpoint
#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    pub id: Option<String>,
}

/// Query of the reservation listing endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ReservationQuery {
    pub status: Option<ReservationStatus>,
}
