//! Resolver, blocking and scoring configuration.
//!
//! Every struct deserializes with per-field defaults so a partial TOML
//! section (or none at all) yields a valid configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Decision thresholds plus the blocking and scoring sub-configurations.
///
/// The thresholds define the decision bands:
/// - Below `review_threshold`: rejected
/// - `review_threshold` to `accept_threshold`: ambiguous
/// - At or above `accept_threshold`: accepted, unless a rival scores
///   within `ambiguity_margin` and the country hint does not separate them
///
/// A hint separates a near tie only when the top candidate is in the hinted
/// country and no close rival is. With `blocking.restrict_to_country` on
/// (the default) every candidate already shares the hinted country, so the
/// hint never breaks a tie; it only takes effect when that flag is false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Minimum top score for an accepted decision (default: 0.85).
    pub accept_threshold: f64,
    /// Minimum top score for an ambiguous decision (default: 0.60).
    pub review_threshold: f64,
    /// Score distance under which a rival counts as a near tie (default: 0.03).
    pub ambiguity_margin: f64,
    /// Candidate blocking limits.
    pub blocking: BlockingConfig,
    /// Signal weights for the scorer.
    pub scoring: ScoringWeights,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            accept_threshold: 0.85,
            review_threshold: 0.60,
            ambiguity_margin: 0.03,
            blocking: BlockingConfig::default(),
            scoring: ScoringWeights::default(),
        }
    }
}

impl ResolverConfig {
    /// Thresholds for unattended pipelines where a wrong accept is costly.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            accept_threshold: 0.93,
            review_threshold: 0.75,
            ambiguity_margin: 0.05,
            ..Self::default()
        }
    }

    /// Thresholds for exploratory lookups.
    #[must_use]
    pub fn relaxed() -> Self {
        Self {
            accept_threshold: 0.80,
            review_threshold: 0.50,
            ambiguity_margin: 0.02,
            ..Self::default()
        }
    }

    /// Check every threshold, weight and limit.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        unit_interval("accept_threshold", self.accept_threshold)?;
        unit_interval("review_threshold", self.review_threshold)?;
        unit_interval("ambiguity_margin", self.ambiguity_margin)?;
        if self.review_threshold > self.accept_threshold {
            return Err(ConfigError::ThresholdOrder {
                review: self.review_threshold,
                accept: self.accept_threshold,
            });
        }
        self.blocking.validate()?;
        self.scoring.validate()
    }
}

/// Limits for the candidate generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockingConfig {
    /// Upper bound on candidates handed to the scorer (default: 50).
    pub max_candidates: usize,
    /// Below this many exact/token hits the fallback scans run (default: 3).
    pub min_candidates: usize,
    /// Restrict the universe to the hinted country (default: true).
    ///
    /// When true the country hint cannot break a near tie, since every
    /// rival is in the hinted country too.
    pub restrict_to_country: bool,
}

impl Default for BlockingConfig {
    fn default() -> Self {
        Self {
            max_candidates: 50,
            min_candidates: 3,
            restrict_to_country: true,
        }
    }
}

impl BlockingConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCandidateLimits`] when `max_candidates`
    /// is zero or below `min_candidates`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_candidates == 0 || self.min_candidates > self.max_candidates {
            return Err(ConfigError::InvalidCandidateLimits {
                max: self.max_candidates,
                min: self.min_candidates,
            });
        }
        Ok(())
    }
}

/// Weights and adjustments used by [`crate::Scorer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Weight of Jaro-Winkler similarity in the base score (default: 0.5).
    pub jaro_winkler_weight: f64,
    /// Weight of token-set similarity in the base score (default: 0.5).
    pub token_set_weight: f64,
    /// Lowest score an exact normalized match can receive (default: 0.95).
    pub exact_match_floor: f64,
    /// Added when the candidate is in the hinted country (default: 0.05).
    pub country_match_bonus: f64,
    /// Subtracted when the candidate is in another country (default: 0.15).
    pub country_mismatch_penalty: f64,
    /// Added when the candidate carries an LEI (default: 0.02).
    pub lei_bonus: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            jaro_winkler_weight: 0.5,
            token_set_weight: 0.5,
            exact_match_floor: 0.95,
            country_match_bonus: 0.05,
            country_mismatch_penalty: 0.15,
            lei_bonus: 0.02,
        }
    }
}

impl ScoringWeights {
    /// # Errors
    ///
    /// Returns [`ConfigError`] for negative or non-finite weights, an
    /// all-zero similarity mix, or adjustments outside [0, 1].
    pub fn validate(&self) -> Result<(), ConfigError> {
        weight("jaro_winkler_weight", self.jaro_winkler_weight)?;
        weight("token_set_weight", self.token_set_weight)?;
        if self.jaro_winkler_weight + self.token_set_weight <= 0.0 {
            return Err(ConfigError::ZeroSimilarityWeight);
        }
        unit_interval("exact_match_floor", self.exact_match_floor)?;
        unit_interval("country_match_bonus", self.country_match_bonus)?;
        unit_interval("country_mismatch_penalty", self.country_mismatch_penalty)?;
        unit_interval("lei_bonus", self.lei_bonus)
    }
}

fn unit_interval(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ThresholdOutOfRange { name, value })
    }
}

fn weight(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidWeight { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(ResolverConfig::default().validate().is_ok());
        assert!(ResolverConfig::strict().validate().is_ok());
        assert!(ResolverConfig::relaxed().validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_threshold() {
        let config = ResolverConfig {
            accept_threshold: 1.2,
            ..ResolverConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ThresholdOutOfRange {
                name: "accept_threshold",
                value: 1.2
            })
        );
    }

    #[test]
    fn test_rejects_nan_threshold() {
        let config = ResolverConfig {
            review_threshold: f64::NAN,
            ..ResolverConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ThresholdOutOfRange { name: "review_threshold", .. })
        ));
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let config = ResolverConfig {
            accept_threshold: 0.5,
            review_threshold: 0.7,
            ..ResolverConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ThresholdOrder { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_weights() {
        let mut config = ResolverConfig::default();
        config.scoring.token_set_weight = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWeight { name: "token_set_weight", .. })
        ));

        let mut config = ResolverConfig::default();
        config.scoring.token_set_weight = 0.0;
        config.scoring.jaro_winkler_weight = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroSimilarityWeight));
    }

    #[test]
    fn test_rejects_bad_candidate_limits() {
        let mut config = ResolverConfig::default();
        config.blocking.max_candidates = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCandidateLimits { .. })
        ));

        let mut config = ResolverConfig::default();
        config.blocking.min_candidates = 80;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: ResolverConfig =
            serde_json::from_str(r#"{"accept_threshold": 0.9, "blocking": {"max_candidates": 10}}"#)
                .unwrap();
        assert_eq!(config.accept_threshold, 0.9);
        assert_eq!(config.review_threshold, 0.60);
        assert_eq!(config.blocking.max_candidates, 10);
        assert_eq!(config.blocking.min_candidates, 3);
        assert_eq!(config.scoring, ScoringWeights::default());
    }
}
