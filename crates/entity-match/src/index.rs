//! Immutable reference index over company records.
//!
//! Built once per snapshot. Positions into the record vector define
//! database order, and every posting list is ascending by position, so
//! iteration order is stable across builds of the same input.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use entity_model::{CompanyRecord, normalize_country};
use entity_normalization::tokens;
use serde::Serialize;

use crate::blocking::CandidateGenerator;
use crate::config::BlockingConfig;

/// Number of leading characters used for fuzzy prefix buckets.
pub const PREFIX_LEN: usize = 3;

/// Country-partitioned, token-indexed view of the reference set.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    records: Vec<Arc<CompanyRecord>>,
    by_country: BTreeMap<String, Vec<usize>>,
    by_key: BTreeMap<String, Vec<usize>>,
    by_token: BTreeMap<String, Vec<usize>>,
    by_prefix: BTreeMap<String, Vec<usize>>,
}

/// Summary counts for an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub records: usize,
    pub countries: usize,
    pub distinct_keys: usize,
    pub tokens: usize,
    pub with_lei: usize,
}

impl ReferenceIndex {
    /// Build the index. Input order becomes database order.
    pub fn build(records: impl IntoIterator<Item = CompanyRecord>) -> Self {
        let mut index = Self {
            records: records.into_iter().map(Arc::new).collect(),
            ..Self::default()
        };

        for (pos, record) in index.records.iter().enumerate() {
            index
                .by_country
                .entry(record.country().to_string())
                .or_default()
                .push(pos);

            let key = record.name_norm();
            if key.is_empty() {
                continue;
            }
            index.by_key.entry(key.to_string()).or_default().push(pos);

            let distinct: BTreeSet<&str> = tokens(key).collect();
            let mut prefixes = BTreeSet::new();
            for token in distinct {
                index
                    .by_token
                    .entry(token.to_string())
                    .or_default()
                    .push(pos);
                if let Some(prefix) = token_prefix(token) {
                    prefixes.insert(prefix);
                }
            }
            for prefix in prefixes {
                index
                    .by_prefix
                    .entry(prefix.to_string())
                    .or_default()
                    .push(pos);
            }
        }

        index
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at a database position.
    pub fn get(&self, position: usize) -> Option<&Arc<CompanyRecord>> {
        self.records.get(position)
    }

    /// All records in database order.
    pub fn all(&self) -> impl Iterator<Item = &Arc<CompanyRecord>> + '_ {
        self.records.iter()
    }

    /// Records of one country (case-insensitive code), in database order.
    pub fn by_country(&self, code: &str) -> impl Iterator<Item = &Arc<CompanyRecord>> + '_ {
        self.records_at(self.country_positions(code))
    }

    /// Country codes with their record counts, sorted by code.
    pub fn countries(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.by_country
            .iter()
            .map(|(code, positions)| (code.as_str(), positions.len()))
    }

    /// Bounded candidate set for a normalized key, using default blocking limits.
    pub fn candidates_for(&self, key: &str, country: Option<&str>) -> Vec<Arc<CompanyRecord>> {
        CandidateGenerator::new(self, &BlockingConfig::default()).generate(key, country)
    }

    /// Case-insensitive substring search over `name` and `name_norm`.
    ///
    /// An empty needle matches every record. Results keep database order
    /// and are capped at `limit` when given.
    pub fn search(
        &self,
        needle: &str,
        country: Option<&str>,
        limit: Option<usize>,
    ) -> Vec<Arc<CompanyRecord>> {
        let needle = needle.trim().to_lowercase();
        let limit = limit.unwrap_or(usize::MAX);
        let universe: Box<dyn Iterator<Item = &Arc<CompanyRecord>>> =
            match country.map(str::trim).filter(|c| !c.is_empty()) {
                Some(code) => Box::new(self.by_country(code)),
                None => Box::new(self.all()),
            };
        universe
            .filter(|record| {
                needle.is_empty()
                    || record.name_norm().contains(&needle)
                    || record.name().to_lowercase().contains(&needle)
            })
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            records: self.records.len(),
            countries: self.by_country.len(),
            distinct_keys: self.by_key.len(),
            tokens: self.by_token.len(),
            with_lei: self.records.iter().filter(|r| r.has_lei()).count(),
        }
    }

    pub(crate) fn country_positions(&self, code: &str) -> &[usize] {
        self.by_country
            .get(&normalize_country(code))
            .map_or(&[], Vec::as_slice)
    }

    pub(crate) fn exact_positions(&self, key: &str) -> &[usize] {
        self.by_key.get(key).map_or(&[], Vec::as_slice)
    }

    pub(crate) fn token_positions(&self, token: &str) -> &[usize] {
        self.by_token.get(token).map_or(&[], Vec::as_slice)
    }

    pub(crate) fn prefix_positions(&self, prefix: &str) -> &[usize] {
        self.by_prefix.get(prefix).map_or(&[], Vec::as_slice)
    }

    pub(crate) fn records_at<'a>(
        &'a self,
        positions: &'a [usize],
    ) -> impl Iterator<Item = &'a Arc<CompanyRecord>> + 'a {
        positions.iter().filter_map(|&pos| self.records.get(pos))
    }
}

/// Leading [`PREFIX_LEN`] characters of a token, if it is that long.
pub(crate) fn token_prefix(token: &str) -> Option<&str> {
    let (idx, ch) = token.char_indices().nth(PREFIX_LEN - 1)?;
    Some(&token[..idx + ch.len_utf8()])
}
