//! Error types for normalizer construction.

use thiserror::Error;

/// Errors raised while building a [`crate::Normalizer`] from configuration.
///
/// Normalizing a name never fails; only an invalid suffix vocabulary does.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizerError {
    /// A configured legal suffix is not a single lowercase alphanumeric token.
    #[error("invalid legal suffix '{suffix}': {reason}")]
    InvalidSuffix { suffix: String, reason: &'static str },
}

/// Result type for normalizer construction.
pub type Result<T> = std::result::Result<T, NormalizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NormalizerError::InvalidSuffix {
            suffix: "Ltd.".to_string(),
            reason: "must be lowercase",
        };
        assert_eq!(
            err.to_string(),
            "invalid legal suffix 'Ltd.': must be lowercase"
        );
    }
}
