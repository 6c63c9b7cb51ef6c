#![cfg(test)]

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::event::dispatcher::{CollectingSink, EventDispatcher};
use crate::event::error::ListenerError;
use crate::event::{Event, EventManager, PRIORITY_HIGH, names};
use crate::kernel::bootstrap::Application;
use crate::model::{Booking, BookingData, BookingStatus, Observable, Reservation, ReservationData, ReservationStatus};

fn booking_data() -> BookingData {
    BookingData {
        id: "BK-9".to_string(),
        property_id: "PR-1".to_string(),
        guest_name: "Sam Guest".to_string(),
        room_type: "TWN".to_string(),
        check_in: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
        check_out: NaiveDate::from_ymd_opt(2026, 10, 22).unwrap(),
        total_amount: 250.0,
        currency: "USD".to_string(),
        status: BookingStatus::Pending,
        notes: None,
    }
}

#[test]
fn test_confirmed_booking_creates_reservation() {
    let app = Application::new();
    let events = app.events().clone();
    let reservations = Arc::new(Mutex::new(Vec::new()));

    let listener_events = events.clone();
    let store = Arc::clone(&reservations);
    events.listen(names::BOOKING_CONFIRMED, 0, move |event: &Event| -> Result<(), ListenerError> {
        let data = ReservationData {
            id: format!("RS-{}", event.get_as::<String>("id").unwrap_or_default()),
            property_id: event.get_as("property_id").unwrap_or_default(),
            booking_id: event.get_as("id"),
            guest_name: event.get_as("guest_name").unwrap_or_default(),
            arrival: event.get_as("check_in").ok_or("missing check_in")?,
            departure: event.get_as("check_out").ok_or("missing check_out")?,
            room_id: None,
            rate_plan: "BAR".to_string(),
            status: ReservationStatus::Confirmed,
        };
        let reservation = Reservation::new(data, &listener_events).map_err(|e| e.to_string())?;
        store.lock().unwrap().push(reservation);
        Ok(())
    });

    let mut booking = Booking::new(booking_data(), &events).unwrap();
    booking.confirm().unwrap();

    let reservations = reservations.lock().unwrap();
    assert_eq!(reservations.len(), 1);
    assert_eq!(reservations[0].id(), "RS-BK-9");
    assert_eq!(reservations[0].data().booking_id.as_deref(), Some("BK-9"));
}

#[test]
fn test_audit_listener_can_veto_downstream_listeners() {
    let events = EventManager::new();
    let downstream = Arc::new(Mutex::new(0));

    events.listen(names::BOOKING_CANCELLED, PRIORITY_HIGH, |event: &Event| {
        event.get_as::<String>("id").as_deref() != Some("BK-9")
    });
    let downstream_clone = Arc::clone(&downstream);
    events.listen(names::BOOKING_CANCELLED, 0, move |_event: &Event| {
        *downstream_clone.lock().unwrap() += 1;
    });

    let mut booking = Booking::new(booking_data(), &events).unwrap();
    booking.cancel().unwrap();

    assert_eq!(*downstream.lock().unwrap(), 0);
    assert_eq!(booking.status(), BookingStatus::Cancelled);
}

#[test]
fn test_failing_listener_never_reaches_the_model() {
    let sink = Arc::new(CollectingSink::new());
    let events = EventManager::with_dispatcher(EventDispatcher::with_error_sink(sink.clone()));
    events.listen(names::BOOKING_CREATED, 0, |_event: &Event| -> Result<(), ListenerError> {
        Err(ListenerError::failed("channel manager offline"))
    });

    let booking = Booking::new(booking_data(), &events);

    assert!(booking.is_ok());
    assert_eq!(sink.failures(), vec![(
        names::BOOKING_CREATED.to_string(),
        "Listener failed: channel manager offline".to_string(),
    )]);
}

#[test]
fn test_bulk_import_without_events() {
    let events = EventManager::new();
    let created = Arc::new(Mutex::new(0));
    let created_clone = Arc::clone(&created);
    events.listen(names::BOOKING_CREATED, 0, move |_event: &Event| {
        *created_clone.lock().unwrap() += 1;
    });

    let imported: Vec<Booking> = events.without_events(|| {
        (0..3)
            .map(|n| {
                let mut data = booking_data();
                data.id = format!("BK-{}", n);
                Booking::new(data, &events)
            })
            .collect::<Result<_, _>>()
    }).unwrap();

    assert_eq!(imported.len(), 3);
    assert_eq!(*created.lock().unwrap(), 0);
    assert!(imported.iter().all(|b| !b.is_dirty()));

    Booking::new(booking_data(), &events).unwrap();
    assert_eq!(*created.lock().unwrap(), 1);
}
