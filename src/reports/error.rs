//! Typed failures surfaced by the report engine.

use chrono::NaiveDate;
use thiserror::Error;

/// A query window that cannot legally be reported on.
///
/// Rules are checked in declaration order; the first violation wins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("start date {start} is before the minimum allowed {min}")]
    BelowMinimumStart { start: NaiveDate, min: NaiveDate },

    #[error("end date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },

    #[error("window of {days} days exceeds the {max}-day maximum")]
    SpanTooLong { days: i64, max: i64 },

    #[error("end date {end} must be strictly before today ({today})")]
    EndNotInPast { end: NaiveDate, today: NaiveDate },

    #[error("missing required field: {field}")]
    MissingRequiredField { field: &'static str },
}

/// The raw payload did not have the expected overall shape.
///
/// This aborts the whole report; it is never downgraded to a partial
/// result. Per-vehicle gaps are not errors and never produce this.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed dataset: {0}")]
pub struct MalformedDatasetError(pub String);

/// Top-level failure of a report run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Dataset(#[from] MalformedDatasetError),
}
