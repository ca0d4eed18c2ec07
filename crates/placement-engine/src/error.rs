//! Error types for placement-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// A time or date string could not be parsed. Never silently coerced.
    #[error("Malformed time: {0}")]
    MalformedTime(String),

    /// Input failed a structural check (empty grade set, empty day set,
    /// inverted interval, zero-length series). Nothing was persisted.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The actor lacks the privilege for the attempted operation.
    #[error("Not authorized: {0}")]
    AuthorizationDenied(String),

    /// Persistence of a generated series stopped partway through. The
    /// sessions named in `succeeded` were already handed off and remain
    /// valid; the engine does not roll them back.
    #[error("Series persistence failed at session {failed_order} of {total}: {message}")]
    PartialSeries {
        /// `series_order` values that were persisted before the failure.
        succeeded: Vec<u32>,
        /// The `series_order` whose persistence failed.
        failed_order: u32,
        /// Total sessions in the generated series.
        total: u32,
        /// The sink's own description of the failure.
        message: String,
    },
}

/// Convenience alias used throughout placement-engine.
pub type Result<T> = std::result::Result<T, EngineError>;
