//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`SubtrackError`]
//! via `#[from]`. Storage adapters box their error so the domain never names
//! an IO crate.

use crate::month::YearMonth;

/// Top-level error returned by services and ports.
#[derive(Debug, thiserror::Error)]
pub enum SubtrackError {
    /// A domain invariant or input format check failed.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The requested record does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The persistence backend failed.
    #[error("storage error")]
    Storage(Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations and malformed input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("service name must not be empty")]
    EmptyServiceName,

    #[error("price must not be negative, got {0}")]
    NegativePrice(i64),

    #[error("end month {end} is before start month {start}")]
    EndBeforeStart { start: YearMonth, end: YearMonth },

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid month `{0}`, expected MM-YYYY")]
    InvalidMonth(String),

    #[error("invalid {kind} `{value}`, expected a UUID")]
    InvalidId { kind: &'static str, value: String },

    /// The request could not be decoded into the expected shape.
    #[error("malformed request: {0}")]
    MalformedRequest(String),
}

/// Lookup failure for a record identified by `id`.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
