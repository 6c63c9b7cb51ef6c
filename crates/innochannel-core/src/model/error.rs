//! # Innochannel Model Errors
//!
//! Defines [`ModelError`], returned when a domain model is given a value it
//! cannot hold.
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("Unknown {model} status '{value}'")]
    UnknownStatus { model: &'static str, value: String },

    #[error("Departure {end} must be after arrival {start}")]
    InvalidDates { start: NaiveDate, end: NaiveDate },

    #[error("Amount {amount} is not a finite number")]
    InvalidAmount { amount: f64 },

    #[error("Invalid {model} payload: {reason}")]
    InvalidPayload { model: &'static str, reason: String },

    #[error("{model} '{id}' has been deleted")]
    Deleted { model: &'static str, id: String },
}
