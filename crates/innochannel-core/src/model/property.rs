use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::event::{Event, EventManager, Payload, names};
use crate::model::error::ModelError;
use crate::model::tracker::{self, Changes, EventTracker};
use crate::model::Observable;

/// Distribution status of a property on the channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyStatus {
    Active,
    Inactive,
    Maintenance,
}

impl PropertyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::Active => "active",
            PropertyStatus::Inactive => "inactive",
            PropertyStatus::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(PropertyStatus::Active),
            "inactive" => Ok(PropertyStatus::Inactive),
            "maintenance" => Ok(PropertyStatus::Maintenance),
            other => Err(ModelError::UnknownStatus { model: "property", value: other.to_string() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyData {
    pub id: String,
    pub name: String,
    pub currency: String,
    pub timezone: String,
    pub room_count: u32,
    pub status: PropertyStatus,
}

/// A property (hotel) listed on the channel.
///
/// Unlike bookings, every status change fires the same
/// `property.status_changed` event carrying both statuses.
#[derive(Debug, Clone)]
pub struct Property {
    data: PropertyData,
    tracker: EventTracker,
}

impl Property {
    pub fn new(data: PropertyData, events: &EventManager) -> Self {
        let mut property = Self { data, tracker: EventTracker::new(events.clone()) };
        property.initialize();
        property.fire_event(&Event::new(names::PROPERTY_CREATED, property.attributes()));
        property
    }

    pub fn data(&self) -> &PropertyData {
        &self.data
    }

    pub fn id(&self) -> &str {
        &self.data.id
    }

    pub fn status(&self) -> PropertyStatus {
        self.data.status
    }

    pub fn set_status(&mut self, status: PropertyStatus) -> Changes {
        self.apply(|data| data.status = status)
    }

    pub fn rename(&mut self, name: impl Into<String>) -> Changes {
        let name = name.into();
        self.apply(|data| data.name = name)
    }

    pub fn set_room_count(&mut self, room_count: u32) -> Changes {
        self.apply(|data| data.room_count = room_count)
    }

    /// Fire `property.deleted`; the value is consumed
    pub fn delete(self) {
        self.fire_event(&Event::new(names::PROPERTY_DELETED, self.attributes()));
    }

    fn apply(&mut self, mutate: impl FnOnce(&mut PropertyData)) -> Changes {
        let before = self.attributes();
        let previous_status = self.data.status;
        mutate(&mut self.data);
        let changes = tracker::diff(&before, &self.attributes());
        if changes.is_empty() {
            return changes;
        }

        self.fire_event(&Event::new(
            names::PROPERTY_UPDATED,
            tracker::changes_payload(&self.data.id, &changes),
        ));
        if self.data.status != previous_status {
            let mut payload = Payload::new();
            payload.insert("id".to_string(), Value::String(self.data.id.clone()));
            payload.insert("old_status".to_string(), Value::String(previous_status.as_str().to_string()));
            payload.insert("new_status".to_string(), Value::String(self.data.status.as_str().to_string()));
            self.fire_event(&Event::new(names::PROPERTY_STATUS_CHANGED, payload));
        }
        changes
    }
}

impl Observable for Property {
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
