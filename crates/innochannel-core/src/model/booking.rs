use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::event::{Event, EventManager, Payload, names};
use crate::model::error::ModelError;
use crate::model::tracker::{self, Changes, EventTracker};
use crate::model::{Observable, validate_amount, validate_stay};

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Modified,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Modified => "modified",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Event fired in addition to `booking.updated` when a booking moves
    /// into this status
    pub fn transition_event(&self) -> Option<&'static str> {
        match self {
            BookingStatus::Confirmed => Some(names::BOOKING_CONFIRMED),
            BookingStatus::Cancelled => Some(names::BOOKING_CANCELLED),
            BookingStatus::Pending | BookingStatus::Modified => None,
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "modified" => Ok(BookingStatus::Modified),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(ModelError::UnknownStatus { model: "booking", value: other.to_string() }),
        }
    }
}

/// Serializable booking attributes, as received from the channel API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingData {
    pub id: String,
    pub property_id: String,
    pub guest_name: String,
    pub room_type: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_amount: f64,
    pub currency: String,
    pub status: BookingStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A booking that reports its lifecycle through the event manager.
///
/// Fires `booking.created` on construction, `booking.updated` on every
/// effective change, `booking.confirmed` / `booking.cancelled` on those
/// status transitions, `booking.modified` when the stay (dates or room)
/// changes, and `booking.deleted` from [`delete`](Booking::delete).
#[derive(Debug, Clone)]
pub struct Booking {
    data: BookingData,
    tracker: EventTracker,
    deleted: bool,
}

impl Booking {
    pub fn new(data: BookingData, events: &EventManager) -> Result<Self, ModelError> {
        validate_stay(data.check_in, data.check_out)?;
        validate_amount(data.total_amount)?;
        let mut booking = Self { data, tracker: EventTracker::new(events.clone()), deleted: false };
        booking.initialize();
        booking.fire_event(&Event::new(names::BOOKING_CREATED, booking.attributes()));
        Ok(booking)
    }

    /// Build a booking from an API payload
    pub fn from_payload(payload: Payload, events: &EventManager) -> Result<Self, ModelError> {
        let data = serde_json::from_value(serde_json::Value::Object(payload))
            .map_err(|e| ModelError::InvalidPayload { model: "booking", reason: e.to_string() })?;
        Self::new(data, events)
    }

    pub fn data(&self) -> &BookingData {
        &self.data
    }

    pub fn id(&self) -> &str {
        &self.data.id
    }

    pub fn status(&self) -> BookingStatus {
        self.data.status
    }

    pub fn guest_name(&self) -> &str {
        &self.data.guest_name
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn set_status(&mut self, status: BookingStatus) -> Result<Changes, ModelError> {
        self.apply(|data| data.status = status)
    }

    pub fn confirm(&mut self) -> Result<Changes, ModelError> {
        self.set_status(BookingStatus::Confirmed)
    }

    pub fn cancel(&mut self) -> Result<Changes, ModelError> {
        self.set_status(BookingStatus::Cancelled)
    }

    pub fn set_guest_name(&mut self, guest_name: impl Into<String>) -> Result<Changes, ModelError> {
        let guest_name = guest_name.into();
        self.apply(|data| data.guest_name = guest_name)
    }

    pub fn set_room_type(&mut self, room_type: impl Into<String>) -> Result<Changes, ModelError> {
        let room_type = room_type.into();
        self.apply(|data| data.room_type = room_type)
    }

    pub fn set_stay(&mut self, check_in: NaiveDate, check_out: NaiveDate) -> Result<Changes, ModelError> {
        validate_stay(check_in, check_out)?;
        self.apply(|data| {
            data.check_in = check_in;
            data.check_out = check_out;
        })
    }

    pub fn set_total(&mut self, total_amount: f64, currency: impl Into<String>) -> Result<Changes, ModelError> {
        validate_amount(total_amount)?;
        let currency = currency.into();
        self.apply(|data| {
            data.total_amount = total_amount;
            data.currency = currency;
        })
    }

    pub fn set_notes(&mut self, notes: Option<String>) -> Result<Changes, ModelError> {
        self.apply(|data| data.notes = notes)
    }

    /// Mark deleted and fire `booking.deleted`. Further mutation fails.
    pub fn delete(&mut self) -> Result<(), ModelError> {
        self.ensure_live()?;
        self.deleted = true;
        self.fire_event(&Event::new(names::BOOKING_DELETED, self.attributes()));
        Ok(())
    }

    fn ensure_live(&self) -> Result<(), ModelError> {
        if self.deleted {
            return Err(ModelError::Deleted { model: "booking", id: self.data.id.clone() });
        }
        Ok(())
    }

    fn apply(&mut self, mutate: impl FnOnce(&mut BookingData)) -> Result<Changes, ModelError> {
        self.ensure_live()?;
        let before = self.attributes();
        let previous_status = self.data.status;
        mutate(&mut self.data);
        let changes = tracker::diff(&before, &self.attributes());
        if changes.is_empty() {
            return Ok(changes);
        }

        let payload = tracker::changes_payload(&self.data.id, &changes);
        self.fire_event(&Event::new(names::BOOKING_UPDATED, payload.clone()));
        if self.data.status != previous_status {
            if let Some(name) = self.data.status.transition_event() {
                self.fire_event(&Event::new(name, self.attributes()));
            }
        }
        if ["check_in", "check_out", "room_type"].iter().any(|field| changes.contains_key(*field)) {
            self.fire_event(&Event::new(names::BOOKING_MODIFIED, payload));
        }
        Ok(changes)
    }
}

impl Observable for Booking {
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
