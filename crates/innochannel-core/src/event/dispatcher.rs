use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

use log::{error, trace};

use crate::event::error::ListenerError;
use crate::event::{
    Event, IntoListenerResult, ListenerId, ListenerOutcome, Priority, SharedListener, listener_fn,
};

//--------------------------------------------------
// Error sinks
//--------------------------------------------------

/// Destination for listener failures caught during dispatch
pub trait ErrorSink: Send + Sync {
    fn listener_failed(&self, event: &Event, error: &ListenerError);
}

/// Writes listener failures to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogErrorSink;

impl ErrorSink for LogErrorSink {
    fn listener_failed(&self, event: &Event, error: &ListenerError) {
        error!("Error in event listener for '{}': {}", event.name(), error);
    }
}

/// Drops listener failures
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSink;

impl ErrorSink for SilentSink {
    fn listener_failed(&self, _event: &Event, _error: &ListenerError) {}
}

/// Records `(event name, error message)` pairs; mostly useful in tests
#[derive(Debug, Default)]
pub struct CollectingSink {
    failures: Mutex<Vec<(String, String)>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> Vec<(String, String)> {
        self.failures
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.failures().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ErrorSink for CollectingSink {
    fn listener_failed(&self, event: &Event, error: &ListenerError) {
        self.failures
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((event.name().to_string(), error.to_string()));
    }
}

//--------------------------------------------------
// Dispatch
//--------------------------------------------------

/// Summary of one dispatch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Listeners that were called
    pub invoked: usize,
    /// Listeners that returned an error or panicked
    pub failures: usize,
    /// A listener asked for propagation to stop
    pub stopped: bool,
}

impl DispatchReport {
    /// `false` when a listener halted propagation
    pub fn propagated(&self) -> bool {
        !self.stopped
    }
}

/// Run `listeners` in the given order against `event`.
///
/// Errors and panics are reported to `sink` and the next listener runs.
/// The first `Stop` ends the loop.
pub fn run_listeners(event: &Event, listeners: &[SharedListener], sink: &dyn ErrorSink) -> DispatchReport {
    let mut report = DispatchReport::default();
    for listener in listeners {
        report.invoked += 1;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| listener.handle(event)))
            .unwrap_or_else(|payload| Err(ListenerError::Panicked(panic_message(payload.as_ref()))));
        match outcome {
            Ok(ListenerOutcome::Continue) => {}
            Ok(ListenerOutcome::Stop) => {
                trace!("Propagation of '{}' stopped by listener {}", event.name(), report.invoked);
                report.stopped = true;
                break;
            }
            Err(e) => {
                report.failures += 1;
                sink.listener_failed(event, &e);
            }
        }
    }
    report
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

//--------------------------------------------------
// EventDispatcher
//--------------------------------------------------

struct Registration {
    id: ListenerId,
    listener: SharedListener,
    priority: Priority,
    sequence: u64,
}

/// Holds listeners per event name and dispatches events to them in
/// descending priority order, ties broken by registration order.
pub struct EventDispatcher {
    listeners: HashMap<String, Vec<Registration>>,
    sorted: HashMap<String, Vec<SharedListener>>,
    next_id: ListenerId,
    next_sequence: u64,
    sink: Arc<dyn ErrorSink>,
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listener_count: usize = self.listeners.values().map(|v| v.len()).sum();
        f.debug_struct("EventDispatcher")
         .field("event_names", &self.listeners.len())
         .field("listener_count", &listener_count)
         .field("cached_orders", &self.sorted.len())
         .field("next_id", &self.next_id)
         .finish()
    }
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::with_error_sink(Arc::new(LogErrorSink))
    }

    /// Dispatcher reporting listener failures to `sink`
    pub fn with_error_sink(sink: Arc<dyn ErrorSink>) -> Self {
        Self {
            listeners: HashMap::new(),
            sorted: HashMap::new(),
            next_id: 1,
            next_sequence: 0,
            sink,
        }
    }

    pub fn error_sink(&self) -> Arc<dyn ErrorSink> {
        Arc::clone(&self.sink)
    }

    pub fn add_listener(&mut self, event_name: impl Into<String>, listener: SharedListener, priority: Priority) -> ListenerId {
        let event_name = event_name.into();
        let id = self.next_id; self.next_id += 1;
        let sequence = self.next_sequence; self.next_sequence += 1;
        self.sorted.remove(&event_name);
        self.listeners.entry(event_name).or_default().push(Registration { id, listener, priority, sequence });
        id
    }

    /// Register a closure listener
    pub fn listen<F, R>(&mut self, event_name: impl Into<String>, priority: Priority, f: F) -> ListenerId
    where
        F: Fn(&Event) -> R + Send + Sync + 'static,
        R: IntoListenerResult + 'static,
    {
        self.add_listener(event_name, listener_fn(f), priority)
    }

    /// Remove the registration with `id` under `event_name`
    pub fn remove_listener(&mut self, event_name: &str, id: ListenerId) -> bool {
        self.remove_where(event_name, |r| r.id == id)
    }

    /// Remove the first registration of this exact listener object
    pub fn remove_listener_instance(&mut self, event_name: &str, listener: &SharedListener) -> bool {
        self.remove_where(event_name, |r| Arc::ptr_eq(&r.listener, listener))
    }

    fn remove_where(&mut self, event_name: &str, matches: impl Fn(&Registration) -> bool) -> bool {
        let Some(registrations) = self.listeners.get_mut(event_name) else {
            return false;
        };
        let Some(index) = registrations.iter().position(matches) else {
            return false;
        };
        registrations.remove(index);
        if registrations.is_empty() {
            self.listeners.remove(event_name);
        }
        self.sorted.remove(event_name);
        true
    }

    /// Listeners for `event_name` in invocation order
    pub fn listeners(&mut self, event_name: &str) -> Vec<SharedListener> {
        if let Some(cached) = self.sorted.get(event_name) {
            return cached.clone();
        }
        let Some(registrations) = self.listeners.get(event_name) else {
            return Vec::new();
        };
        let mut ordered: Vec<&Registration> = registrations.iter().collect();
        ordered.sort_by_key(|r| (Reverse(r.priority), r.sequence));
        let ordered: Vec<SharedListener> = ordered.into_iter().map(|r| Arc::clone(&r.listener)).collect();
        self.sorted.insert(event_name.to_string(), ordered.clone());
        ordered
    }

    pub fn has_listeners(&self, event_name: &str) -> bool {
        self.listener_count(event_name) > 0
    }

    pub fn listener_count(&self, event_name: &str) -> usize {
        self.listeners.get(event_name).map_or(0, Vec::len)
    }

    /// Names that currently have at least one listener
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.listeners.keys().cloned().collect();
        names.sort();
        names
    }

    /// Dispatch `event`, returning `false` if a listener stopped propagation
    pub fn dispatch(&mut self, event: &Event) -> bool {
        self.dispatch_with_report(event).propagated()
    }

    pub fn dispatch_with_report(&mut self, event: &Event) -> DispatchReport {
        let listeners = self.listeners(event.name());
        if listeners.is_empty() {
            return DispatchReport::default();
        }
        trace!("Dispatching '{}' to {} listener(s)", event.name(), listeners.len());
        run_listeners(event, &listeners, self.sink.as_ref())
    }

    #[cfg(test)]
    pub(crate) fn is_cached(&self, event_name: &str) -> bool {
        self.sorted.contains_key(event_name)
    }
}

impl Default for EventDispatcher { fn default() -> Self { Self::new() } }
