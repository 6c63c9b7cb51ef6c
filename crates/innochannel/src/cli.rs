use std::fs;
use std::path::Path;

use innochannel_core::event::{Event, Listener, ListenerOutcome, ListenerResult, Payload};
use innochannel_core::{Error, Result};
use serde::Deserialize;

/// Listener printing every event it receives to standard output.
#[derive(Debug, Default)]
pub struct ConsoleListener;

impl Listener for ConsoleListener {
    fn handle(&self, event: &Event) -> ListenerResult {
        let payload = serde_json::to_string(event.data())?;
        println!("[event] {} {}", event.name(), payload);
        Ok(ListenerOutcome::Continue)
    }
}

/// Body of a webhook delivery as saved to disk
#[derive(Debug, Deserialize)]
pub struct WebhookBody {
    pub event: String,
    #[serde(default)]
    pub data: Payload,
}

impl WebhookBody {
    pub fn read(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
        serde_json::from_str(&raw).map_err(|source| Error::Json { what: "webhook body", source })
    }

    pub fn into_event(self) -> Event {
        Event::new(self.event, self.data)
    }
}

/// Parse a `--payload` argument; absent means an empty payload
pub fn parse_payload(raw: Option<&str>) -> Result<serde_json::Value> {
    match raw {
        Some(raw) => serde_json::from_str(raw).map_err(|source| Error::Json { what: "payload", source }),
        None => Ok(serde_json::Value::Null),
    }
}
