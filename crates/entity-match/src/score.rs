//! Candidate scoring.
//!
//! The base signal is a weighted mix of Jaro-Winkler similarity on the
//! full keys and a token-set similarity that ignores word order. Country
//! and identifier signals then adjust it, and exact key matches get a
//! floor. Every adjustment is recorded as a [`ScoreComponent`] so callers
//! can see why a candidate scored the way it did.

use std::collections::BTreeSet;

use entity_model::{CompanyRecord, ScoreComponent, explain_components};
use entity_normalization::tokens;
use rapidfuzz::distance::{indel, jaro_winkler};

use crate::config::ScoringWeights;

/// Score for a single query-candidate pair.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateScore {
    /// Final score, clamped to [0, 1].
    pub score: f64,
    /// Breakdown of score components for explainability.
    pub components: Vec<ScoreComponent>,
}

impl CandidateScore {
    /// Human-readable explanation of the score.
    pub fn explain(&self) -> String {
        explain_components(&self.components)
    }
}

/// Scores candidates against a normalized query.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    weights: ScoringWeights,
}

impl Scorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score `candidate` against an already-normalized query.
    ///
    /// Deterministic: the same query, hint, candidate and weights always
    /// produce the same score.
    pub fn score(
        &self,
        query: &str,
        country: Option<&str>,
        candidate: &CompanyRecord,
    ) -> CandidateScore {
        let w = &self.weights;
        let target = candidate.name_norm();
        let mut components = Vec::new();

        // 1. Base: weighted name similarity
        let (jw, ts) = if query.is_empty() || target.is_empty() {
            (0.0, 0.0)
        } else {
            (
                jaro_winkler::similarity(query.chars(), target.chars()),
                token_set_ratio(query, target),
            )
        };
        let total_weight = w.jaro_winkler_weight + w.token_set_weight;
        let base = if total_weight > 0.0 {
            (w.jaro_winkler_weight * jw + w.token_set_weight * ts) / total_weight
        } else {
            0.0
        };
        components.push(ScoreComponent {
            name: "Name similarity",
            value: base,
            description: format!(
                "'{query}' vs '{target}' (jaro-winkler {jw:.2}, token set {ts:.2})"
            ),
        });
        let mut score = base;

        // 2. Country hint
        let mut country_conflict = false;
        if let Some(hint) = country.map(str::trim).filter(|c| !c.is_empty()) {
            if candidate.in_country(hint) {
                score += w.country_match_bonus;
                components.push(ScoreComponent {
                    name: "Country match",
                    value: w.country_match_bonus,
                    description: format!("Candidate is in {}", candidate.country()),
                });
            } else {
                country_conflict = true;
                score -= w.country_mismatch_penalty;
                components.push(ScoreComponent {
                    name: "Country mismatch",
                    value: -w.country_mismatch_penalty,
                    description: format!(
                        "Hint {} but candidate is in {}",
                        hint.to_uppercase(),
                        candidate.country()
                    ),
                });
            }
        }

        // 3. Identifier presence
        if let Some(lei) = candidate.lei()
            && w.lei_bonus > 0.0
        {
            score += w.lei_bonus;
            components.push(ScoreComponent {
                name: "LEI present",
                value: w.lei_bonus,
                description: format!("Candidate carries LEI {lei}"),
            });
        }

        // 4. Exact normalized match floor
        if !query.is_empty() && query == target && !country_conflict {
            let raise = (w.exact_match_floor - score).max(0.0);
            score = score.max(w.exact_match_floor);
            components.push(ScoreComponent {
                name: "Exact match",
                value: raise,
                description: format!("Normalized names are identical ('{target}')"),
            });
        }

        CandidateScore {
            score: score.clamp(0.0, 1.0),
            components,
        }
    }
}

/// Order-insensitive token similarity in [0, 1].
///
/// Both sides are reduced to their sorted, de-duplicated tokens with the
/// shared tokens first, then compared with normalized Indel similarity.
/// Extra tokens on either side lower the score, so a bare `apple` does not
/// fully match `apple hospitality reit`.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let left: BTreeSet<&str> = tokens(a).collect();
    let right: BTreeSet<&str> = tokens(b).collect();
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }

    let shared: Vec<&str> = left.intersection(&right).copied().collect();
    let only_left: Vec<&str> = left.difference(&right).copied().collect();
    let only_right: Vec<&str> = right.difference(&left).copied().collect();

    let combined_left = join_parts(&shared, &only_left);
    let combined_right = join_parts(&shared, &only_right);
    indel::normalized_similarity(combined_left.chars(), combined_right.chars())
}

fn join_parts(shared: &[&str], rest: &[&str]) -> String {
    shared
        .iter()
        .chain(rest.iter())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}
