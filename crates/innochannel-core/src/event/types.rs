use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Event payload: a JSON object keyed by field name
pub type Payload = Map<String, Value>;

/// A named, timestamped payload broadcast to listeners.
///
/// Events are immutable once built; listeners only ever see a shared
/// reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    name: String,
    payload: Payload,
    timestamp: DateTime<Utc>,
}

impl Event {
    pub fn new(name: impl Into<String>, payload: Payload) -> Self {
        Self {
            name: name.into(),
            payload,
            timestamp: Utc::now(),
        }
    }

    /// Event with an empty payload
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, Payload::new())
    }

    /// Build an event from an arbitrary JSON value.
    ///
    /// Objects become the payload as-is and `null` gives an empty payload.
    /// Any other value is stored under the `"value"` key.
    pub fn from_value(name: impl Into<String>, value: Value) -> Self {
        let payload = match value {
            Value::Object(map) => map,
            Value::Null => Payload::new(),
            other => {
                let mut map = Payload::new();
                map.insert("value".to_string(), other);
                map
            }
        };
        Self::new(name, payload)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The event payload
    pub fn data(&self) -> &Payload {
        &self.payload
    }

    /// Look up a single payload field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Deserialize a payload field into a concrete type
    pub fn get_as<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        self.payload
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }
}

/// Event names emitted by the shipped domain models
pub mod names {
    pub const BOOKING_CREATED: &str = "booking.created";
    pub const BOOKING_UPDATED: &str = "booking.updated";
    pub const BOOKING_MODIFIED: &str = "booking.modified";
    pub const BOOKING_CONFIRMED: &str = "booking.confirmed";
    pub const BOOKING_CANCELLED: &str = "booking.cancelled";
    pub const BOOKING_DELETED: &str = "booking.deleted";

    pub const RESERVATION_CREATED: &str = "reservation.created";
    pub const RESERVATION_UPDATED: &str = "reservation.updated";
    pub const RESERVATION_CONFIRMED: &str = "reservation.confirmed";
    pub const RESERVATION_CANCELLED: &str = "reservation.cancelled";
    pub const RESERVATION_CHECKED_IN: &str = "reservation.checked_in";
    pub const RESERVATION_CHECKED_OUT: &str = "reservation.checked_out";
    pub const RESERVATION_NO_SHOW: &str = "reservation.no_show";
    pub const RESERVATION_DELETED: &str = "reservation.deleted";

    pub const PROPERTY_CREATED: &str = "property.created";
    pub const PROPERTY_UPDATED: &str = "property.updated";
    pub const PROPERTY_STATUS_CHANGED: &str = "property.status_changed";
    pub const PROPERTY_DELETED: &str = "property.deleted";
}
