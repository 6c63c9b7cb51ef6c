//! # Innochannel Core Kernel Errors
//!
//! [`Error`] wraps the typed errors of each subsystem so application code
//! can use one `Result` type with `?`.
use std::path::PathBuf;
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::config::error::ConfigError;
use crate::model::error::ModelError;

#[derive(Debug, ThisError)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A domain model rejected a value
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// A file outside the configuration layer could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON supplied by the caller did not parse
    #[error("Invalid {what} JSON: {source}")]
    Json {
        what: &'static str,
        source: serde_json::Error,
    },

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}
