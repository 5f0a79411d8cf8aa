//! Normalizer configuration.

use serde::{Deserialize, Serialize};

/// Legal-form suffixes stripped from the end of a name by default.
///
/// Only trailing whole words are removed, so `"Co-operative Bank"` keeps
/// its `co` token while `"Acme Co"` reduces to `acme`.
pub const DEFAULT_LEGAL_SUFFIXES: &[&str] = &[
    "inc",
    "incorporated",
    "corp",
    "corporation",
    "co",
    "company",
    "ltd",
    "limited",
    "llc",
    "plc",
    "gmbh",
    "group",
    "lp",
    "llp",
    "ag",
    "sa",
    "nv",
    "bv",
    "se",
    "spa",
    "ab",
    "asa",
    "oyj",
    "pty",
    "pte",
    "kk",
    "holding",
    "holdings",
];

/// Configuration for [`crate::Normalizer`].
///
/// Every field has a default so a partial TOML section is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Suffix tokens stripped from the end of a name, in normalized form.
    pub legal_suffixes: Vec<String>,
    /// Upper bound on how many trailing suffixes are stripped.
    ///
    /// `None` strips until the last token is not a suffix, which keeps
    /// normalization idempotent. A bound can leave a suffix behind that a
    /// second pass would remove.
    pub max_suffix_strips: Option<usize>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            legal_suffixes: DEFAULT_LEGAL_SUFFIXES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            max_suffix_strips: None,
        }
    }
}

impl NormalizerConfig {
    /// Replace the suffix vocabulary.
    #[must_use]
    pub fn with_legal_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.legal_suffixes = suffixes.into_iter().map(Into::into).collect();
        self
    }

    /// Bound the number of suffixes stripped per name.
    #[must_use]
    pub fn with_max_suffix_strips(mut self, max: Option<usize>) -> Self {
        self.max_suffix_strips = max;
        self
    }
}
