//! Candidate blocking.
//!
//! Scoring every record against every query is the dominant cost, so the
//! generator hands the scorer a bounded, likely-relevant subset:
//!
//! 1. Exact `name_norm` hits (always first)
//! 2. Records sharing significant tokens with the query, most shared first
//! 3. When 1 and 2 yield fewer than `min_candidates`: prefix-bucket hits,
//!    then a substring scan of the universe

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use entity_model::{CompanyRecord, normalize_country};
use entity_normalization::tokens;

use crate::config::BlockingConfig;
use crate::index::{ReferenceIndex, token_prefix};

/// Reverse containment ("query contains key") needs a key at least this long.
const MIN_CONTAINED_KEY_LEN: usize = 3;

const STOPWORDS: &[&str] = &[
    "the", "and", "of", "de", "la", "le", "du", "der", "die", "das", "el", "for", "a", "an",
];

/// Returns true if `token` is worth blocking on.
///
/// Stopwords never are; otherwise a token needs two characters unless it
/// is numeric.
pub fn is_significant_token(token: &str) -> bool {
    if STOPWORDS.contains(&token) {
        return false;
    }
    token.chars().count() >= 2 || token.chars().all(char::is_numeric)
}

/// Produces bounded candidate sets from a [`ReferenceIndex`].
#[derive(Debug, Clone, Copy)]
pub struct CandidateGenerator<'a> {
    index: &'a ReferenceIndex,
    config: &'a BlockingConfig,
}

enum Universe {
    All,
    Country(String),
}

struct Selection {
    positions: Vec<usize>,
    seen: BTreeSet<usize>,
    cap: usize,
}

impl Selection {
    fn push(&mut self, pos: usize) {
        if self.positions.len() < self.cap && self.seen.insert(pos) {
            self.positions.push(pos);
        }
    }

    fn is_full(&self) -> bool {
        self.positions.len() >= self.cap
    }
}

impl<'a> CandidateGenerator<'a> {
    pub fn new(index: &'a ReferenceIndex, config: &'a BlockingConfig) -> Self {
        Self { index, config }
    }

    /// Candidate records for a normalized query, at most `max_candidates`.
    pub fn generate(&self, query: &str, country: Option<&str>) -> Vec<Arc<CompanyRecord>> {
        let positions = self.generate_positions(query, country);
        self.index.records_at(&positions).cloned().collect()
    }

    /// Database positions of the candidates, in blocking priority order.
    pub fn generate_positions(&self, query: &str, country: Option<&str>) -> Vec<usize> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let universe = match country.map(str::trim).filter(|c| !c.is_empty()) {
            Some(code) if self.config.restrict_to_country => {
                Universe::Country(normalize_country(code))
            }
            _ => Universe::All,
        };
        let in_universe = |pos: usize| match &universe {
            Universe::All => true,
            Universe::Country(code) => self
                .index
                .get(pos)
                .is_some_and(|record| record.country() == code),
        };

        let mut selection = Selection {
            positions: Vec::new(),
            seen: BTreeSet::new(),
            cap: self.config.max_candidates,
        };

        for &pos in self.index.exact_positions(query) {
            if in_universe(pos) {
                selection.push(pos);
            }
        }

        let query_tokens: BTreeSet<&str> = tokens(query).filter(|t| is_significant_token(t)).collect();
        let mut overlap: BTreeMap<usize, usize> = BTreeMap::new();
        for token in &query_tokens {
            for &pos in self.index.token_positions(token) {
                if in_universe(pos) && !selection.seen.contains(&pos) {
                    *overlap.entry(pos).or_insert(0) += 1;
                }
            }
        }
        let mut ranked: Vec<(usize, usize)> = overlap.into_iter().collect();
        // Stable: equal overlap keeps database order.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        for (pos, _) in ranked {
            if selection.is_full() {
                break;
            }
            selection.push(pos);
        }

        if selection.positions.len() < self.config.min_candidates {
            self.fallback(query, &query_tokens, &universe, &in_universe, &mut selection);
        }

        selection.positions
    }

    fn fallback(
        &self,
        query: &str,
        query_tokens: &BTreeSet<&str>,
        universe: &Universe,
        in_universe: &dyn Fn(usize) -> bool,
        selection: &mut Selection,
    ) {
        let prefixes: BTreeSet<&str> = query_tokens
            .iter()
            .filter_map(|token| token_prefix(token))
            .collect();
        for prefix in prefixes {
            for &pos in self.index.prefix_positions(prefix) {
                if selection.is_full() {
                    return;
                }
                if in_universe(pos) {
                    selection.push(pos);
                }
            }
        }

        if selection.positions.len() >= self.config.min_candidates {
            return;
        }

        let scan: Box<dyn Iterator<Item = usize> + '_> = match universe {
            Universe::All => Box::new(0..self.index.len()),
            Universe::Country(code) => Box::new(self.index.country_positions(code).iter().copied()),
        };
        for pos in scan {
            if selection.is_full() {
                return;
            }
            let Some(record) = self.index.get(pos) else {
                continue;
            };
            let key = record.name_norm();
            if key.is_empty() {
                continue;
            }
            let contains = key.contains(query)
                || (key.chars().count() >= MIN_CONTAINED_KEY_LEN && query.contains(key));
            if contains {
                selection.push(pos);
            }
        }
    }
}
