use serde_json::json;

use crate::event::{Event, Payload};

#[test]
fn test_event_carries_name_and_payload() {
    let event = Event::from_value("order.created", json!({ "id": 42 }));
    assert_eq!(event.name(), "order.created");
    assert_eq!(event.get("id"), Some(&json!(42)));
    assert_eq!(event.get_as::<u64>("id"), Some(42));
    assert_eq!(event.get("missing"), None);
}

#[test]
fn test_named_event_has_empty_payload() {
    let event = Event::named("property.synced");
    assert!(event.data().is_empty());
}

#[test]
fn test_from_value_wraps_scalars() {
    let event = Event::from_value("rate.changed", json!(99.5));
    assert_eq!(event.get("value"), Some(&json!(99.5)));

    let event = Event::from_value("rate.cleared", serde_json::Value::Null);
    assert!(event.data().is_empty());
}

#[test]
fn test_timestamp_is_taken_at_creation() {
    let before = chrono::Utc::now();
    let event = Event::new("booking.created", Payload::new());
    let after = chrono::Utc::now();
    assert!(event.timestamp() >= before && event.timestamp() <= after);

    let copy = event.clone();
    assert_eq!(copy.timestamp(), event.timestamp());
}

#[test]
fn test_event_serializes_for_forwarding() {
    let event = Event::from_value("booking.confirmed", json!({ "id": "BK-1" }));
    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["name"], json!("booking.confirmed"));
    assert_eq!(value["payload"]["id"], json!("BK-1"));

    let back: Event = serde_json::from_value(value).unwrap();
    assert_eq!(back, event);
}
