//! Resolution: normalize, block, score, rank, decide.

use std::sync::Arc;

use entity_model::{CompanyRecord, Decision, MatchCandidate, ResolutionResult, normalize_country};
use entity_normalization::Normalizer;
use tracing::debug;

use crate::blocking::CandidateGenerator;
use crate::config::ResolverConfig;
use crate::error::ConfigError;
use crate::index::ReferenceIndex;
use crate::score::Scorer;

/// Resolves free-text company names against a [`ReferenceIndex`].
///
/// Holds no per-call state, so one resolver can serve any number of
/// concurrent calls.
#[derive(Debug, Clone)]
pub struct Resolver {
    normalizer: Normalizer,
    config: ResolverConfig,
    scorer: Scorer,
}

impl Default for Resolver {
    fn default() -> Self {
        let config = ResolverConfig::default();
        Self {
            normalizer: Normalizer::default(),
            scorer: Scorer::new(config.scoring.clone()),
            config,
        }
    }
}

impl Resolver {
    /// Create a resolver, validating `config` first.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a threshold, weight or candidate limit
    /// is invalid.
    pub fn new(normalizer: Normalizer, config: ResolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            normalizer,
            scorer: Scorer::new(config.scoring.clone()),
            config,
        })
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Resolve `raw` against `index`.
    ///
    /// Never fails: empty or unmatched input yields a rejected result.
    pub fn resolve(
        &self,
        index: &ReferenceIndex,
        raw: &str,
        country: Option<&str>,
    ) -> ResolutionResult {
        let hint = country
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(normalize_country);
        let normalized = self.normalizer.normalize(raw);
        if normalized.is_empty() {
            debug!(query = raw, decision = %Decision::Rejected, "empty normalized query");
            return ResolutionResult::rejected(raw, normalized, hint);
        }

        let generator = CandidateGenerator::new(index, &self.config.blocking);
        let mut positions = generator.generate_positions(&normalized, hint.as_deref());
        positions.sort_unstable();

        let mut matches: Vec<MatchCandidate> = positions
            .into_iter()
            .filter_map(|position| {
                let record = index.get(position)?;
                let scored = self.scorer.score(&normalized, hint.as_deref(), record);
                Some(MatchCandidate {
                    record: Arc::clone(record),
                    position,
                    score: scored.score,
                    components: scored.components,
                })
            })
            .collect();
        // Stable: equal scores stay in database order.
        matches.sort_by(|a, b| b.score.total_cmp(&a.score));

        let decision = self.decide(&matches, hint.as_deref());
        let final_match = match decision {
            Decision::Accepted => matches.first().map(|m| Arc::clone(&m.record)),
            Decision::Ambiguous | Decision::Rejected => None,
        };

        debug!(
            query = raw,
            normalized = %normalized,
            decision = %decision,
            top_score = matches.first().map(|m| m.score),
            candidates = matches.len(),
            "resolved"
        );

        ResolutionResult {
            query: raw.to_string(),
            normalized,
            country: hint,
            decision,
            final_match,
            matches,
        }
    }

    /// The accepted record for `raw`, if resolution accepts one.
    pub fn match_best(
        &self,
        index: &ReferenceIndex,
        raw: &str,
        country: Option<&str>,
    ) -> Option<Arc<CompanyRecord>> {
        self.resolve(index, raw, country).final_match
    }

    fn decide(&self, matches: &[MatchCandidate], hint: Option<&str>) -> Decision {
        let Some((top, rest)) = matches.split_first() else {
            return Decision::Rejected;
        };
        if top.score < self.config.review_threshold {
            return Decision::Rejected;
        }
        if top.score < self.config.accept_threshold {
            return Decision::Ambiguous;
        }

        let mut rivals = rest
            .iter()
            .filter(|m| top.score - m.score < self.config.ambiguity_margin)
            .peekable();
        if rivals.peek().is_none() {
            return Decision::Accepted;
        }

        // A hint breaks the tie only if it separates the top from every close rival.
        let separated = hint.is_some_and(|code| {
            top.record.in_country(code) && !rivals.any(|m| m.record.in_country(code))
        });
        if separated {
            Decision::Accepted
        } else {
            Decision::Ambiguous
        }
    }
}
