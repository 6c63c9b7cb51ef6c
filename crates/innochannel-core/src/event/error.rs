//! # Innochannel Event System Errors
//!
//! Defines [`ListenerError`], the failure a listener can report while an
//! event is being dispatched. The dispatcher never hands these back to the
//! code that fired the event; they are delivered to the configured
//! [`ErrorSink`](crate::event::ErrorSink) and dispatch moves on.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("Listener failed: {0}")]
    Failed(String),

    #[error("Listener panicked: {0}")]
    Panicked(String),

    #[error("Listener could not read event payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl ListenerError {
    /// Build a [`ListenerError::Failed`] from anything printable
    pub fn failed(reason: impl std::fmt::Display) -> Self {
        ListenerError::Failed(reason.to_string())
    }
}

impl From<String> for ListenerError {
    fn from(reason: String) -> Self {
        ListenerError::Failed(reason)
    }
}

impl From<&str> for ListenerError {
    fn from(reason: &str) -> Self {
        ListenerError::Failed(reason.to_string())
    }
}
