//! Boundary error type.
//!
//! The planning engines never fail: incomplete data degrades into a flagged
//! status. Errors only arise where the crate touches the outside world:
//! time-of-day parsing, configuration loading, board lookups by id and the
//! suggestion backend.

use thiserror::Error;

/// Errors raised at the crate boundary.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// A `"HH:MM"` time of day could not be parsed.
    #[error("invalid time of day: {0}")]
    InvalidTime(String),

    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// A board operation named an entity that does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// The suggestion backend failed or produced an unusable response.
    #[error("oracle error: {0}")]
    Oracle(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias for boundary operations.
pub type Result<T> = std::result::Result<T, PlannerError>;
