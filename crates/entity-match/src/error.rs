//! Error types for resolver configuration.

use thiserror::Error;

/// Invalid threshold, weight or blocking configuration.
///
/// Detected when a [`crate::Resolver`] is constructed; resolution itself
/// never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A threshold, margin or adjustment outside [0, 1].
    #[error("{name} must be within [0.0, 1.0], got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },

    /// The review threshold is above the accept threshold.
    #[error("review_threshold ({review}) must not exceed accept_threshold ({accept})")]
    ThresholdOrder { review: f64, accept: f64 },

    /// A similarity weight that is negative or not finite.
    #[error("{name} must be a finite, non-negative weight, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },

    /// Both similarity weights are zero.
    #[error("at least one name similarity weight must be positive")]
    ZeroSimilarityWeight,

    /// Candidate limits that cannot be satisfied.
    #[error("invalid candidate limits: max_candidates={max}, min_candidates={min}")]
    InvalidCandidateLimits { max: usize, min: usize },
}
