pub mod config;
pub mod event;
pub mod kernel;
pub mod model;

// Re-export key public types for the binary and SDK consumers
pub use config::{CoreConfig, EventsConfig};
pub use event::{Event, EventDispatcher, EventManager, Listener, ListenerOutcome};
pub use kernel::{Application, Error, Result};
pub use model::{Booking, Observable, Property, Reservation};

#[cfg(test)]
mod tests;
