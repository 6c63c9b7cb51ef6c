use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::event::{Event, EventManager, Payload};

/// Old and new value of one changed field. `old` is `None` when the field
/// was absent from the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Change {
    pub old: Option<Value>,
    pub new: Value,
}

/// Changed fields keyed by name
pub type Changes = BTreeMap<String, Change>;

/// Fields of `current` whose value differs from `original`
pub fn diff(original: &Payload, current: &Payload) -> Changes {
    current
        .iter()
        .filter(|(field, value)| original.get(field.as_str()) != Some(*value))
        .map(|(field, value)| {
            let change = Change {
                old: original.get(field).cloned(),
                new: value.clone(),
            };
            (field.clone(), change)
        })
        .collect()
}

/// Serialize a model's attributes into a payload. Anything that does not
/// serialize to a JSON object yields an empty payload.
pub fn to_payload<T: Serialize>(value: &T) -> Payload {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map,
        _ => Payload::new(),
    }
}

/// Payload carried by `<domain>.updated` style events
pub fn changes_payload(id: &str, changes: &Changes) -> Payload {
    let mut payload = Payload::new();
    payload.insert("id".to_string(), Value::String(id.to_string()));
    payload.insert(
        "changes".to_string(),
        serde_json::to_value(changes).unwrap_or(Value::Null),
    );
    payload
}

/// Per-instance event state held by an observable model: the original
/// attribute snapshot, the instance event gate, and the manager events go
/// through.
#[derive(Clone)]
pub struct EventTracker {
    original: Payload,
    events_enabled: bool,
    manager: EventManager,
}

impl fmt::Debug for EventTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventTracker")
         .field("original_fields", &self.original.len())
         .field("events_enabled", &self.events_enabled)
         .finish_non_exhaustive()
    }
}

impl EventTracker {
    pub fn new(manager: EventManager) -> Self {
        Self {
            original: Payload::new(),
            events_enabled: true,
            manager,
        }
    }

    pub fn snapshot(&mut self, attributes: Payload) {
        self.original = attributes;
    }

    pub fn original(&self) -> &Payload {
        &self.original
    }

    pub fn manager(&self) -> &EventManager {
        &self.manager
    }

    pub fn events_enabled(&self) -> bool {
        self.events_enabled
    }

    pub fn set_events_enabled(&mut self, enabled: bool) {
        self.events_enabled = enabled;
    }

    /// Forward `event` to the manager unless this instance is muted
    pub fn fire(&self, event: &Event) -> bool {
        if !self.events_enabled {
            return true;
        }
        self.manager.fire(event)
    }

    pub fn is_dirty(&self, current: &Payload) -> bool {
        *current != self.original
    }

    pub fn changes(&self, current: &Payload) -> Changes {
        diff(&self.original, current)
    }
}
