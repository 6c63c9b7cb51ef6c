//! # Observable domain models
//!
//! Models hold an [`EventTracker`] and implement [`Observable`] to get dirty
//! tracking and gated event emission. Each model decides which events a
//! change maps to; see [`Booking`], [`Reservation`] and [`Property`].
pub mod booking;
pub mod error;
pub mod property;
pub mod reservation;
pub mod tracker;

use std::panic::{self, AssertUnwindSafe};

use chrono::NaiveDate;
use serde_json::Value;

use crate::event::{Event, Payload};

pub use booking::{Booking, BookingData, BookingStatus};
pub use error::ModelError;
pub use property::{Property, PropertyData, PropertyStatus};
pub use reservation::{Reservation, ReservationData, ReservationStatus};
pub use tracker::{Change, Changes, EventTracker};

/// Dirty tracking and event emission for a domain model.
///
/// Implementors supply their serialized attributes and access to their
/// tracker; everything else is provided.
pub trait Observable {
    /// Current attributes as a JSON object
    fn attributes(&self) -> Payload;

    fn tracker(&self) -> &EventTracker;

    fn tracker_mut(&mut self) -> &mut EventTracker;

    /// Snapshot the current attributes as the clean state. Call once the
    /// attributes are first populated.
    fn initialize(&mut self) {
        let attributes = self.attributes();
        self.tracker_mut().snapshot(attributes);
    }

    /// Mark the current state clean
    fn sync_original(&mut self) {
        self.initialize();
    }

    /// Fire through the manager if this instance has events enabled
    fn fire_event(&self, event: &Event) -> bool {
        self.tracker().fire(event)
    }

    fn enable_events(&mut self) -> &mut Self
    where
        Self: Sized,
    {
        self.tracker_mut().set_events_enabled(true);
        self
    }

    fn disable_events(&mut self) -> &mut Self
    where
        Self: Sized,
    {
        self.tracker_mut().set_events_enabled(false);
        self
    }

    fn events_enabled(&self) -> bool {
        self.tracker().events_enabled()
    }

    fn is_dirty(&self) -> bool {
        self.tracker().is_dirty(&self.attributes())
    }

    fn get_changes(&self) -> Changes {
        self.tracker().changes(&self.attributes())
    }

    /// Value of `field` in the clean snapshot
    fn get_original(&self, field: &str) -> Option<&Value> {
        self.tracker().original().get(field)
    }

    /// Run `f` with this instance's events disabled, restoring the previous
    /// state afterwards even if `f` panics
    fn without_events<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R
    where
        Self: Sized,
    {
        let was_enabled = self.events_enabled();
        self.tracker_mut().set_events_enabled(false);
        let result = panic::catch_unwind(AssertUnwindSafe(|| f(&mut *self)));
        self.tracker_mut().set_events_enabled(was_enabled);
        match result {
            Ok(value) => value,
            Err(payload) => panic::resume_unwind(payload),
        }
    }
}

/// Departure must fall strictly after arrival
pub(crate) fn validate_stay(start: NaiveDate, end: NaiveDate) -> Result<(), ModelError> {
    if end <= start {
        return Err(ModelError::InvalidDates { start, end });
    }
    Ok(())
}

/// Amounts must be finite
pub(crate) fn validate_amount(amount: f64) -> Result<(), ModelError> {
    if !amount.is_finite() {
        return Err(ModelError::InvalidAmount { amount });
    }
    Ok(())
}

#[cfg(test)]
mod tests;
