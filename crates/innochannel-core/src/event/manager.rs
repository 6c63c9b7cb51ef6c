use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use log::{debug, trace};

use crate::config::EventsConfig;
use crate::event::dispatcher::{self, DispatchReport, EventDispatcher, LogErrorSink, SilentSink};
use crate::event::{Event, IntoListenerResult, ListenerId, Priority, SharedListener};

struct ManagerState {
    dispatcher: Mutex<EventDispatcher>,
    enabled: AtomicBool,
}

/// Application-wide access point to one [`EventDispatcher`].
///
/// Clones share the same dispatcher and enabled flag, so the manager can be
/// built once at startup and handed to every component that fires events.
/// [`EventManager::global`] offers the same thing as a lazily created
/// process-wide instance.
#[derive(Clone)]
pub struct EventManager {
    state: Arc<ManagerState>,
}

impl fmt::Debug for EventManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventManager")
         .field("enabled", &self.is_enabled())
         .field("dispatcher", &*self.lock())
         .finish()
    }
}

static GLOBAL: OnceLock<EventManager> = OnceLock::new();

impl EventManager {
    /// Create a new manager with a fresh dispatcher, events enabled
    pub fn new() -> Self {
        Self::with_dispatcher(EventDispatcher::new())
    }

    pub fn with_dispatcher(dispatcher: EventDispatcher) -> Self {
        Self {
            state: Arc::new(ManagerState {
                dispatcher: Mutex::new(dispatcher),
                enabled: AtomicBool::new(true),
            }),
        }
    }

    pub fn from_config(config: &EventsConfig) -> Self {
        let dispatcher = if config.log_listener_failures {
            EventDispatcher::with_error_sink(Arc::new(LogErrorSink))
        } else {
            EventDispatcher::with_error_sink(Arc::new(SilentSink))
        };
        let manager = Self::with_dispatcher(dispatcher);
        if !config.enabled {
            manager.disable();
        }
        manager
    }

    /// The shared process-wide manager, created on first access
    pub fn global() -> &'static EventManager {
        GLOBAL.get_or_init(EventManager::new)
    }

    // Listener panics are caught inside `run_listeners` without the lock
    // held, so a poisoned mutex still holds consistent state.
    fn lock(&self) -> MutexGuard<'_, EventDispatcher> {
        self.state.dispatcher.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Fire `event` if events are enabled.
    ///
    /// Returns `false` only when a listener stopped propagation; a
    /// suppressed event counts as delivered.
    pub fn fire(&self, event: &Event) -> bool {
        self.fire_with_report(event).is_none_or(|report| report.propagated())
    }

    /// Like [`fire`](Self::fire); `None` means the event was suppressed
    pub fn fire_with_report(&self, event: &Event) -> Option<DispatchReport> {
        if !self.is_enabled() {
            debug!("Events disabled, dropping '{}'", event.name());
            return None;
        }
        // Snapshot the ordered listeners and release the lock before running
        // them so listeners can fire or register in turn.
        let (listeners, sink) = {
            let mut dispatcher = self.lock();
            (dispatcher.listeners(event.name()), dispatcher.error_sink())
        };
        if listeners.is_empty() {
            return Some(DispatchReport::default());
        }
        trace!("Firing '{}' to {} listener(s)", event.name(), listeners.len());
        Some(dispatcher::run_listeners(event, &listeners, sink.as_ref()))
    }

    pub fn enable(&self) {
        self.state.enabled.store(true, Ordering::SeqCst);
    }

    pub fn disable(&self) {
        self.state.enabled.store(false, Ordering::SeqCst);
    }

    pub fn is_enabled(&self) -> bool {
        self.state.enabled.load(Ordering::SeqCst)
    }

    pub fn add_listener(&self, event_name: impl Into<String>, listener: SharedListener, priority: Priority) -> ListenerId {
        self.lock().add_listener(event_name, listener, priority)
    }

    /// Register a closure listener
    pub fn listen<F, R>(&self, event_name: impl Into<String>, priority: Priority, f: F) -> ListenerId
    where
        F: Fn(&Event) -> R + Send + Sync + 'static,
        R: IntoListenerResult + 'static,
    {
        self.lock().listen(event_name, priority, f)
    }

    pub fn remove_listener(&self, event_name: &str, id: ListenerId) -> bool {
        self.lock().remove_listener(event_name, id)
    }

    pub fn remove_listener_instance(&self, event_name: &str, listener: &SharedListener) -> bool {
        self.lock().remove_listener_instance(event_name, listener)
    }

    pub fn has_listeners(&self, event_name: &str) -> bool {
        self.lock().has_listeners(event_name)
    }

    pub fn listener_count(&self, event_name: &str) -> usize {
        self.lock().listener_count(event_name)
    }

    /// Replace the dispatcher with an empty one. The enabled flag and the
    /// error sink are kept.
    pub fn clear_listeners(&self) {
        let mut dispatcher = self.lock();
        let sink = dispatcher.error_sink();
        *dispatcher = EventDispatcher::with_error_sink(sink);
    }

    /// Disable events until the returned guard is dropped, then restore the
    /// previous state
    pub fn suppress(&self) -> SuppressionGuard<'_> {
        let was_enabled = self.is_enabled();
        self.disable();
        SuppressionGuard { manager: self, was_enabled }
    }

    /// Run `f` with events disabled.
    ///
    /// The previous enabled state comes back on every exit path, including
    /// an `Err` return or a panic unwinding out of `f`.
    pub fn without_events<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.suppress();
        f()
    }
}

impl Default for EventManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Restores the manager's enabled flag on drop
#[must_use = "events are re-enabled as soon as the guard is dropped"]
pub struct SuppressionGuard<'a> {
    manager: &'a EventManager,
    was_enabled: bool,
}

impl Drop for SuppressionGuard<'_> {
    fn drop(&mut self) {
        if self.was_enabled {
            self.manager.enable();
        }
    }
}
