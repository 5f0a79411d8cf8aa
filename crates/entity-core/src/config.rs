//! Application configuration.
//!
//! Loaded from TOML. Every section and field is optional:
//!
//! ```toml
//! [data]
//! paths = ["data/companies.csv"]
//!
//! [normalizer]
//! legal_suffixes = ["inc", "ltd", "plc"]
//!
//! [resolver]
//! accept_threshold = 0.9
//!
//! [resolver.blocking]
//! max_candidates = 25
//! ```

use std::path::{Path, PathBuf};

use entity_match::{Resolver, ResolverConfig};
use entity_normalization::{Normalizer, NormalizerConfig};
use serde::{Deserialize, Serialize};

use crate::error::{EntityError, Result};

/// Environment variable overriding the reference data location.
///
/// Holds one path or several joined with the platform path separator.
pub const DATA_ENV_VAR: &str = "ENTITYIDENTITY_DATA";

/// Get the default reference data files.
///
/// Checks the `ENTITYIDENTITY_DATA` environment variable first, then falls
/// back to the bundled `data/companies.csv`.
pub fn default_data_paths() -> Vec<PathBuf> {
    if let Some(value) = std::env::var_os(DATA_ENV_VAR)
        && !value.is_empty()
    {
        return std::env::split_paths(&value).collect();
    }
    vec![bundled_data_path()]
}

/// Path of the sample dataset shipped with the workspace.
pub fn bundled_data_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/companies.csv")
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub normalizer: NormalizerConfig,
    pub resolver: ResolverConfig,
}

/// `[data]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Reference files, loaded in order. Empty means [`default_data_paths`].
    pub paths: Vec<PathBuf>,
}

impl AppConfig {
    /// Read and parse a TOML configuration file.
    ///
    /// Relative data paths are resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::ConfigFile`] if the file cannot be read and
    /// [`EntityError::ConfigParse`] if it is not valid configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| EntityError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&content, path)?;
        if let Some(base) = path.parent() {
            for data_path in &mut config.data.paths {
                if data_path.is_relative() {
                    *data_path = base.join(&*data_path);
                }
            }
        }
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse TOML text. `origin` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::ConfigParse`] on invalid TOML or field types.
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| EntityError::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Configured data paths, or the defaults when none are configured.
    pub fn data_paths(&self) -> Vec<PathBuf> {
        if self.data.paths.is_empty() {
            default_data_paths()
        } else {
            self.data.paths.clone()
        }
    }

    /// Validate the normalizer and resolver sections and build the resolver.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::Normalizer`] or [`EntityError::Config`].
    pub fn build_resolver(&self) -> Result<Resolver> {
        let normalizer = Normalizer::new(&self.normalizer)?;
        Ok(Resolver::new(normalizer, self.resolver.clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = AppConfig::parse("", Path::new("empty.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.build_resolver().is_ok());
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::parse(
            r#"
            [data]
            paths = ["a.csv", "b.jsonl"]

            [normalizer]
            legal_suffixes = ["inc", "ltd"]
            max_suffix_strips = 1

            [resolver]
            accept_threshold = 0.9

            [resolver.scoring]
            lei_bonus = 0.0
            "#,
            Path::new("entityidentity.toml"),
        )
        .unwrap();
        assert_eq!(config.data.paths, vec![PathBuf::from("a.csv"), PathBuf::from("b.jsonl")]);
        assert_eq!(config.normalizer.legal_suffixes, vec!["inc", "ltd"]);
        assert_eq!(config.normalizer.max_suffix_strips, Some(1));
        assert_eq!(config.resolver.accept_threshold, 0.9);
        assert_eq!(config.resolver.review_threshold, 0.6);
        assert_eq!(config.resolver.scoring.lei_bonus, 0.0);
        assert_eq!(config.resolver.blocking.max_candidates, 50);
    }

    #[test]
    fn test_parse_error() {
        let err = AppConfig::parse("[resolver]\naccept_threshold = \"high\"", Path::new("bad.toml"))
            .unwrap_err();
        assert!(matches!(err, EntityError::ConfigParse { .. }));
    }

    #[test]
    fn test_invalid_sections_fail_at_build() {
        let config = AppConfig::parse(
            "[resolver]\naccept_threshold = 0.5\nreview_threshold = 0.7",
            Path::new("inverted.toml"),
        )
        .unwrap();
        assert!(matches!(config.build_resolver(), Err(EntityError::Config(_))));

        let config = AppConfig::parse(
            "[normalizer]\nlegal_suffixes = [\"Ltd.\"]",
            Path::new("suffix.toml"),
        )
        .unwrap();
        assert!(matches!(config.build_resolver(), Err(EntityError::Normalizer(_))));
    }

    #[test]
    fn test_configured_paths_take_precedence() {
        let config = AppConfig {
            data: DataConfig {
                paths: vec![PathBuf::from("/srv/refdata.csv")],
            },
            ..AppConfig::default()
        };
        assert_eq!(config.data_paths(), vec![PathBuf::from("/srv/refdata.csv")]);
    }
}
