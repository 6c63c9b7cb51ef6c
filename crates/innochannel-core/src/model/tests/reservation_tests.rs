use chrono::NaiveDate;
use serde_json::json;

use crate::event::names;
use crate::model::error::ModelError;
use crate::model::reservation::{Reservation, ReservationData, ReservationStatus};
use crate::model::Observable;

use super::{fired_names, recording_manager};

const ALL_RESERVATION_EVENTS: &[&str] = &[
    names::RESERVATION_CREATED,
    names::RESERVATION_UPDATED,
    names::RESERVATION_CONFIRMED,
    names::RESERVATION_CANCELLED,
    names::RESERVATION_CHECKED_IN,
    names::RESERVATION_CHECKED_OUT,
    names::RESERVATION_NO_SHOW,
    names::RESERVATION_DELETED,
];

fn sample_data() -> ReservationData {
    ReservationData {
        id: "RS-55".to_string(),
        property_id: "PR-7".to_string(),
        booking_id: Some("BK-1001".to_string()),
        guest_name: "Ada Guest".to_string(),
        arrival: NaiveDate::from_ymd_opt(2026, 11, 3).unwrap(),
        departure: NaiveDate::from_ymd_opt(2026, 11, 6).unwrap(),
        room_id: None,
        rate_plan: "BAR".to_string(),
        status: ReservationStatus::Pending,
    }
}

#[test]
fn test_stay_lifecycle_events() {
    let (manager, seen) = recording_manager(ALL_RESERVATION_EVENTS);
    let mut reservation = Reservation::new(sample_data(), &manager).unwrap();

    reservation.confirm().unwrap();
    reservation.assign_room("101").unwrap();
    reservation.check_in().unwrap();
    reservation.check_out().unwrap();
    reservation.delete().unwrap();

    assert_eq!(
        fired_names(&seen),
        vec![
            names::RESERVATION_CREATED,
            names::RESERVATION_UPDATED,
            names::RESERVATION_CONFIRMED,
            names::RESERVATION_UPDATED,
            names::RESERVATION_UPDATED,
            names::RESERVATION_CHECKED_IN,
            names::RESERVATION_UPDATED,
            names::RESERVATION_CHECKED_OUT,
            names::RESERVATION_DELETED,
        ]
    );
}

#[test]
fn test_no_show_and_cancel_have_events() {
    let (manager, seen) = recording_manager(ALL_RESERVATION_EVENTS);
    let mut reservation = Reservation::new(sample_data(), &manager).unwrap();
    reservation.mark_no_show().unwrap();
    reservation.cancel().unwrap();

    let names_seen = fired_names(&seen);
    assert!(names_seen.contains(&names::RESERVATION_NO_SHOW.to_string()));
    assert!(names_seen.contains(&names::RESERVATION_CANCELLED.to_string()));
}

#[test]
fn test_back_to_pending_only_updates() {
    let (manager, seen) = recording_manager(ALL_RESERVATION_EVENTS);
    let mut reservation = Reservation::new(sample_data(), &manager).unwrap();
    reservation.confirm().unwrap();
    seen.lock().unwrap().clear();

    reservation.set_status(ReservationStatus::Pending).unwrap();
    assert_eq!(fired_names(&seen), vec![names::RESERVATION_UPDATED]);
}

#[test]
fn test_room_assignment_tracked_as_change() {
    let (manager, _seen) = recording_manager(&[]);
    let mut reservation = Reservation::new(sample_data(), &manager).unwrap();
    reservation.assign_room("204").unwrap();

    let changes = reservation.get_changes();
    assert_eq!(changes["room_id"].old, Some(serde_json::Value::Null));
    assert_eq!(changes["room_id"].new, json!("204"));
}

#[test]
fn test_without_events_suppresses_lifecycle() {
    let (manager, seen) = recording_manager(ALL_RESERVATION_EVENTS);
    let mut reservation = Reservation::new(sample_data(), &manager).unwrap();
    seen.lock().unwrap().clear();

    reservation.without_events(|r| r.check_in()).unwrap();

    assert_eq!(reservation.status(), ReservationStatus::CheckedIn);
    assert!(fired_names(&seen).is_empty());
    assert!(reservation.events_enabled());
}

#[test]
fn test_invalid_dates_and_status() {
    let manager = crate::event::EventManager::new();
    let mut data = sample_data();
    data.departure = data.arrival;
    assert!(matches!(Reservation::new(data, &manager), Err(ModelError::InvalidDates { .. })));

    assert_eq!("no_show".parse::<ReservationStatus>().unwrap(), ReservationStatus::NoShow);
    assert!("checkedin".parse::<ReservationStatus>().is_err());
}

#[test]
fn test_deleted_reservation_rejects_changes() {
    let (manager, seen) = recording_manager(ALL_RESERVATION_EVENTS);
    let mut reservation = Reservation::new(sample_data(), &manager).unwrap();
    reservation.delete().unwrap();
    seen.lock().unwrap().clear();

    assert!(matches!(reservation.delete(), Err(ModelError::Deleted { model: "reservation", .. })));
    assert!(matches!(reservation.check_in(), Err(ModelError::Deleted { .. })));
    assert!(matches!(reservation.set_guest_name("Grace Guest"), Err(ModelError::Deleted { .. })));
    assert!(fired_names(&seen).is_empty());
    assert_eq!(reservation.data().guest_name, "Ada Guest");
}
