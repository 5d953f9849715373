//! Error types for the RS Lang client
//!
//! All errors use thiserror for structured error handling.
//! Remote calls return these explicitly; callers decide whether a
//! failure is surfaced or swallowed.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// The request could not complete (connection, TLS, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-2xx status
    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("{0}")]
    Generic(String),
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
