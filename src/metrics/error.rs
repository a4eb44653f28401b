//! Error types for metric registration and updates.

use thiserror::Error;

/// Shared result type for the metrics module.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Errors reported synchronously by the registration and update APIs.
///
/// The exposition path never returns one of these: encoding only reads
/// state that was validated when it was created.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// A metric with this name is already registered.
    #[error("metric '{0}' is already registered")]
    DuplicateName(String),

    /// A label-value tuple did not match the declared label names.
    #[error("metric '{metric}' expects {expected} label values, got {got}")]
    LabelCardinality {
        metric: String,
        expected: usize,
        got: usize,
    },

    /// A counter was asked to decrease.
    #[error("counter increment must be non-negative, got {0}")]
    InvalidDelta(f64),

    /// Histogram bucket boundaries were empty, non-finite, or not ascending.
    #[error("invalid histogram buckets: {0}")]
    InvalidBuckets(String),

    /// A metric or label name did not match the allowed character set.
    #[error("invalid metric or label name '{0}'")]
    InvalidName(String),
}
