//! # Innochannel Core Kernel
//!
//! Wires the pieces of `innochannel-core` together for an application:
//!
//! - **Bootstrapping**: [`Application`](bootstrap::Application) loads a
//!   [`CoreConfig`](crate::config::CoreConfig) and builds the shared
//!   [`EventManager`](crate::event::EventManager) handed to models.
//! - **Error Handling**: [`Error`](error::Error) aggregates the subsystem
//!   errors, with a `Result` alias.
pub mod bootstrap;
pub mod constants;
pub mod error;

pub use bootstrap::Application;
pub use error::{Error, Result};
