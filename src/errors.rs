//! Error types for metric scoring.
//!
//! Malformed input fails fast; an empty sample collection is not an error
//! (it scores 1.0, see [`crate::limits::EvalPolicy`]). Nothing here is
//! transient, so there is no retry classification: every error means the
//! caller handed the engine input it must fix first.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    /// A sample that cannot be ordered against any interval (NaN or infinite).
    #[error("malformed metric sample {value}: not a finite number")]
    MalformedSample { value: f64 },

    /// Aggregate coverage must be a percentage in 0..=100.
    #[error("coverage percentage {value} is outside 0..=100")]
    CoverageOutOfRange { value: f64 },

    /// Threshold or weight configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),
}
