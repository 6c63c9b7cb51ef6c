#[cfg(test)]
mod reservation_tests;

use std::sync::{Arc, Mutex};

use crate::event::{Event, EventManager};

/// Manager that records every event fired under any of `names`, in order
pub(crate) fn recording_manager(names: &[&str]) -> (EventManager, Arc<Mutex<Vec<Event>>>) {
    let manager = EventManager::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    for name in names {
        let seen_clone = Arc::clone(&seen);
        manager.listen(*name, 0, move |event: &Event| {
            seen_clone.lock().unwrap().push(event.clone());
        });
    }
    (manager, seen)
}

pub(crate) fn fired_names(seen: &Arc<Mutex<Vec<Event>>>) -> Vec<String> {
    seen.lock().unwrap().iter().map(|e| e.name().to_string()).collect()
}
