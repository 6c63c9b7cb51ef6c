pub mod dispatcher;
pub mod error;
pub mod manager;
pub mod types;

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::event::error::ListenerError;

/// Type for listener identifiers
pub type ListenerId = u64;

/// Listener priority. Higher values run first.
pub type Priority = i32;

/// Priority for listeners that should run after everything else
pub const PRIORITY_LOW: Priority = -100;
/// Priority used when none is given
pub const PRIORITY_NORMAL: Priority = 0;
/// Priority for listeners that should run before the normal ones
pub const PRIORITY_HIGH: Priority = 100;

/// Result of a single listener invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerOutcome {
    /// Event was handled and propagation should continue
    Continue,
    /// Propagation should stop; remaining listeners are skipped
    Stop,
}

/// What a listener hands back to the dispatcher
pub type ListenerResult = Result<ListenerOutcome, ListenerError>;

/// Synchronous event listener
pub trait Listener: Send + Sync {
    fn handle(&self, event: &Event) -> ListenerResult;
}

/// Listener shared between the dispatcher and whoever registered it
pub type SharedListener = Arc<dyn Listener>;

/// Conversion of the values a closure listener may return.
///
/// `()` and `true` continue, `false` stops propagation, `None` continues,
/// and `Err` is reported as a listener failure.
pub trait IntoListenerResult {
    fn into_listener_result(self) -> ListenerResult;
}

impl IntoListenerResult for ListenerOutcome {
    fn into_listener_result(self) -> ListenerResult {
        Ok(self)
    }
}

impl IntoListenerResult for () {
    fn into_listener_result(self) -> ListenerResult {
        Ok(ListenerOutcome::Continue)
    }
}

impl IntoListenerResult for bool {
    fn into_listener_result(self) -> ListenerResult {
        if self {
            Ok(ListenerOutcome::Continue)
        } else {
            Ok(ListenerOutcome::Stop)
        }
    }
}

impl IntoListenerResult for Option<bool> {
    fn into_listener_result(self) -> ListenerResult {
        self.unwrap_or(true).into_listener_result()
    }
}

impl<T, E> IntoListenerResult for Result<T, E>
where
    T: IntoListenerResult,
    E: Into<ListenerError>,
{
    fn into_listener_result(self) -> ListenerResult {
        match self {
            Ok(value) => value.into_listener_result(),
            Err(e) => Err(e.into()),
        }
    }
}

/// Adapter turning a closure into a [`Listener`]
pub struct FnListener<F, R> {
    f: F,
    _returns: PhantomData<fn() -> R>,
}

impl<F, R> fmt::Debug for FnListener<F, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnListener").finish_non_exhaustive()
    }
}

impl<F, R> Listener for FnListener<F, R>
where
    F: Fn(&Event) -> R + Send + Sync,
    R: IntoListenerResult,
{
    fn handle(&self, event: &Event) -> ListenerResult {
        (self.f)(event).into_listener_result()
    }
}

/// Wrap a closure as a shareable listener.
///
/// Keep the returned `Arc` around if the listener needs to be removed by
/// identity later.
pub fn listener_fn<F, R>(f: F) -> SharedListener
where
    F: Fn(&Event) -> R + Send + Sync + 'static,
    R: IntoListenerResult + 'static,
{
    Arc::new(FnListener { f, _returns: PhantomData })
}

/// Re-export important types
pub use dispatcher::{CollectingSink, DispatchReport, ErrorSink, EventDispatcher, LogErrorSink, SilentSink};
pub use manager::{EventManager, SuppressionGuard};
pub use types::{Event, Payload, names};

// Test module declaration
#[cfg(test)]
mod tests;
