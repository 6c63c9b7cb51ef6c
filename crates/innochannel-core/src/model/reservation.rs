use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::event::{Event, EventManager, Payload, names};
use crate::model::error::ModelError;
use crate::model::tracker::{self, Changes, EventTracker};
use crate::model::{Observable, validate_stay};

/// Stay status of a reservation at the property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
    NoShow,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::CheckedIn => "checked_in",
            ReservationStatus::CheckedOut => "checked_out",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::NoShow => "no_show",
        }
    }

    /// Every status other than pending has its own event
    pub fn transition_event(&self) -> Option<&'static str> {
        match self {
            ReservationStatus::Pending => None,
            ReservationStatus::Confirmed => Some(names::RESERVATION_CONFIRMED),
            ReservationStatus::CheckedIn => Some(names::RESERVATION_CHECKED_IN),
            ReservationStatus::CheckedOut => Some(names::RESERVATION_CHECKED_OUT),
            ReservationStatus::Cancelled => Some(names::RESERVATION_CANCELLED),
            ReservationStatus::NoShow => Some(names::RESERVATION_NO_SHOW),
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "checked_in" => Ok(ReservationStatus::CheckedIn),
            "checked_out" => Ok(ReservationStatus::CheckedOut),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            "no_show" => Ok(ReservationStatus::NoShow),
            other => Err(ModelError::UnknownStatus { model: "reservation", value: other.to_string() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationData {
    pub id: String,
    pub property_id: String,
    #[serde(default)]
    pub booking_id: Option<String>,
    pub guest_name: String,
    pub arrival: NaiveDate,
    pub departure: NaiveDate,
    #[serde(default)]
    pub room_id: Option<String>,
    pub rate_plan: String,
    pub status: ReservationStatus,
}

/// A reservation that reports its lifecycle through the event manager.
#[derive(Debug, Clone)]
pub struct Reservation {
    data: ReservationData,
    tracker: EventTracker,
    deleted: bool,
}

impl Reservation {
    pub fn new(data: ReservationData, events: &EventManager) -> Result<Self, ModelError> {
        validate_stay(data.arrival, data.departure)?;
        let mut reservation = Self { data, tracker: EventTracker::new(events.clone()), deleted: false };
        reservation.initialize();
        reservation.fire_event(&Event::new(names::RESERVATION_CREATED, reservation.attributes()));
        Ok(reservation)
    }

    pub fn from_payload(payload: Payload, events: &EventManager) -> Result<Self, ModelError> {
        let data = serde_json::from_value(serde_json::Value::Object(payload))
            .map_err(|e| ModelError::InvalidPayload { model: "reservation", reason: e.to_string() })?;
        Self::new(data, events)
    }

    pub fn data(&self) -> &ReservationData {
        &self.data
    }

    pub fn id(&self) -> &str {
        &self.data.id
    }

    pub fn status(&self) -> ReservationStatus {
        self.data.status
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn set_status(&mut self, status: ReservationStatus) -> Result<Changes, ModelError> {
        self.apply(|data| data.status = status)
    }

    pub fn confirm(&mut self) -> Result<Changes, ModelError> {
        self.set_status(ReservationStatus::Confirmed)
    }

    pub fn cancel(&mut self) -> Result<Changes, ModelError> {
        self.set_status(ReservationStatus::Cancelled)
    }

    pub fn check_in(&mut self) -> Result<Changes, ModelError> {
        self.set_status(ReservationStatus::CheckedIn)
    }

    pub fn check_out(&mut self) -> Result<Changes, ModelError> {
        self.set_status(ReservationStatus::CheckedOut)
    }

    pub fn mark_no_show(&mut self) -> Result<Changes, ModelError> {
        self.set_status(ReservationStatus::NoShow)
    }

    pub fn assign_room(&mut self, room_id: impl Into<String>) -> Result<Changes, ModelError> {
        let room_id = room_id.into();
        self.apply(|data| data.room_id = Some(room_id))
    }

    pub fn set_guest_name(&mut self, guest_name: impl Into<String>) -> Result<Changes, ModelError> {
        let guest_name = guest_name.into();
        self.apply(|data| data.guest_name = guest_name)
    }

    pub fn set_dates(&mut self, arrival: NaiveDate, departure: NaiveDate) -> Result<Changes, ModelError> {
        validate_stay(arrival, departure)?;
        self.apply(|data| {
            data.arrival = arrival;
            data.departure = departure;
        })
    }

    pub fn delete(&mut self) -> Result<(), ModelError> {
        self.ensure_live()?;
        self.deleted = true;
        self.fire_event(&Event::new(names::RESERVATION_DELETED, self.attributes()));
        Ok(())
    }

    fn ensure_live(&self) -> Result<(), ModelError> {
        if self.deleted {
            return Err(ModelError::Deleted { model: "reservation", id: self.data.id.clone() });
        }
        Ok(())
    }

    fn apply(&mut self, mutate: impl FnOnce(&mut ReservationData)) -> Result<Changes, ModelError> {
        self.ensure_live()?;
        let before = self.attributes();
        let previous_status = self.data.status;
        mutate(&mut self.data);
        let changes = tracker::diff(&before, &self.attributes());
        if changes.is_empty() {
            return Ok(changes);
        }

        self.fire_event(&Event::new(
            names::RESERVATION_UPDATED,
            tracker::changes_payload(&self.data.id, &changes),
        ));
        if self.data.status != previous_status {
            if let Some(name) = self.data.status.transition_event() {
                self.fire_event(&Event::new(name, self.attributes()));
            }
        }
        Ok(changes)
    }
}

impl Observable for Reservation {
    fn attributes(&self) -> Payload {
        tracker::to_payload(&self.data)
    }

    fn tracker(&self) -> &EventTracker {
        &self.tracker
    }

    fn tracker_mut(&mut self) -> &mut EventTracker {
        &mut self.tracker
    }
}
