//! Crate-level error type.

use crate::location::LocationError;
use thiserror::Error;

/// Everything that can stop a daylight report from being produced.
#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "Invalid date format: {input}. Use YYYY-MM-DD or keywords: today, tomorrow, yesterday, day-after"
    )]
    InvalidDateFormat { input: String },

    /// Malformed coordinates or an unknown time-zone identifier.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Location(#[from] LocationError),

    #[error("Could not serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
