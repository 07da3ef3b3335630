//! Core error types for autofocus-core.
//!
//! Collaborator stores surface `StoreError`; everything the library itself
//! can reject is a `ValidationError`. Both roll up into `CoreError`.

use thiserror::Error;

/// Core error type for autofocus-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Collaborator store failures
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Errors surfaced by collaborator stores (interval, schedule, session,
/// checkpoint). The core never retries these; poll boundaries degrade to a
/// neutral result instead.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backend temporarily unreachable or refusing the read
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Any other backend failure
    #[error("Store backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Validation-specific errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A weekly schedule must name at least one weekday
    #[error("Weekly schedule '{schedule_id}' has no days of week")]
    EmptyWeeklyDays { schedule_id: String },

    /// A weekday index outside 0..=6
    #[error("Day of week {day} is out of range (expected 0-6)")]
    DayOutOfRange { day: u8 },

    /// An interval whose end precedes its start
    #[error("Interval end {end} precedes start {start}")]
    InvalidInterval { start: String, end: String },
}
