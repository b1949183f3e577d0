//! Domain validation errors for alert types.
//!
//! These errors are returned by `try_new` constructors and by the alert
//! service when a request violates an alerting rule.
//!
//! # Examples
//!
//! ```
//! use tokenwatch::domain::alert::{Direction, NewAlert};
//! use tokenwatch::domain::error::DomainError;
//!
//! let result = NewAlert::try_new("u1", "chan-1", "us", 0, Direction::Above);
//! assert!(matches!(result, Err(DomainError::NonPositiveThreshold)));
//! ```

use thiserror::Error;

/// Errors that occur when alert invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Thresholds are whole gold amounts and must be at least 1.
    #[error("threshold must be positive")]
    NonPositiveThreshold,

    /// Threshold falls outside the configured alerting range.
    #[error("threshold {threshold} outside allowed range {min}..={max}")]
    ThresholdOutOfRange {
        /// The rejected threshold.
        threshold: u64,
        /// Inclusive lower bound.
        min: u64,
        /// Inclusive upper bound.
        max: u64,
    },

    /// Region is not one of the tracked regions.
    #[error("unknown region '{region}'")]
    UnknownRegion {
        /// The rejected region.
        region: String,
    },

    /// Direction string was neither `above` nor `below`.
    #[error("invalid direction '{value}', expected 'above' or 'below'")]
    InvalidDirection {
        /// The rejected input.
        value: String,
    },
}
