//! Error types for the entity identity service.

use std::path::PathBuf;

use entity_ingest::IngestError;
use entity_match::ConfigError;
use entity_normalization::NormalizerError;
use thiserror::Error;

/// Errors raised while configuring the service or loading reference data.
///
/// Resolution itself never fails; these cover setup and reload only.
#[derive(Debug, Error)]
pub enum EntityError {
    /// Invalid legal-suffix configuration.
    #[error("invalid normalizer configuration: {0}")]
    Normalizer(#[from] NormalizerError),

    /// Invalid thresholds, weights or candidate limits.
    #[error("invalid resolver configuration: {0}")]
    Config(#[from] ConfigError),

    /// Reference data could not be loaded.
    #[error("failed to load reference data: {0}")]
    Load(#[from] IngestError),

    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::AppConfig`].
    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, EntityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_conversions() {
        let err: EntityError = ConfigError::ZeroSimilarityWeight.into();
        assert!(matches!(err, EntityError::Config(_)));
        assert!(err.to_string().starts_with("invalid resolver configuration"));

        let err: EntityError = IngestError::EmptySource {
            path: PathBuf::from("empty.csv"),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "failed to load reference data: no usable company records in empty.csv"
        );
    }
}
