//! The normalization pipeline.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::config::NormalizerConfig;
use crate::error::{NormalizerError, Result};

static DEFAULT_NORMALIZER: OnceLock<Normalizer> = OnceLock::new();

/// Canonicalizes raw organization names into comparison keys.
///
/// A `Normalizer` is immutable after construction and cheap to share
/// between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalizer {
    suffixes: BTreeSet<String>,
    max_suffix_strips: Option<usize>,
}

impl Default for Normalizer {
    fn default() -> Self {
        default_normalizer().clone()
    }
}

impl Normalizer {
    /// Build a normalizer from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizerError::InvalidSuffix`] if a configured suffix is
    /// empty, contains uppercase characters, or contains anything other
    /// than letters and digits.
    pub fn new(config: &NormalizerConfig) -> Result<Self> {
        let mut suffixes = BTreeSet::new();
        for suffix in &config.legal_suffixes {
            validate_suffix(suffix)?;
            suffixes.insert(suffix.clone());
        }
        Ok(Self {
            suffixes,
            max_suffix_strips: config.max_suffix_strips,
        })
    }

    /// Normalize a raw name into its comparison key.
    pub fn normalize(&self, raw: &str) -> String {
        let lowered = fold_case(raw);
        let standardized = standardize_punctuation(lowered.as_str().nfkc());
        let mut words: Vec<&str> = standardized.split_whitespace().collect();
        self.strip_legal_suffixes(&mut words);
        words.join(" ")
    }

    /// Returns true if `token` is a configured legal-form suffix.
    pub fn is_legal_suffix(&self, token: &str) -> bool {
        self.suffixes.contains(token)
    }

    /// The configured suffix vocabulary, sorted.
    pub fn legal_suffixes(&self) -> impl Iterator<Item = &str> {
        self.suffixes.iter().map(String::as_str)
    }

    fn strip_legal_suffixes(&self, words: &mut Vec<&str>) {
        let mut stripped = 0usize;
        while let Some(last) = words.last() {
            if self.max_suffix_strips.is_some_and(|max| stripped >= max) {
                break;
            }
            if !self.suffixes.contains(*last) {
                break;
            }
            words.pop();
            stripped += 1;
        }
    }
}

/// The process-wide normalizer built from [`NormalizerConfig::default`].
pub fn default_normalizer() -> &'static Normalizer {
    DEFAULT_NORMALIZER.get_or_init(|| Normalizer {
        suffixes: NormalizerConfig::default()
            .legal_suffixes
            .into_iter()
            .collect(),
        max_suffix_strips: None,
    })
}

/// Normalize a name with the default configuration.
pub fn normalize_name(raw: &str) -> String {
    default_normalizer().normalize(raw)
}

/// Split a normalized key into its tokens.
pub fn tokens(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split_whitespace()
}

/// NFKC, then per-character lowercase.
fn fold_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.nfkc() {
        match ch {
            // Dotted capital I folds to a plain i, not i + U+0307.
            '\u{130}' => out.push('i'),
            c => out.extend(c.to_lowercase()),
        }
    }
    out
}

/// Map punctuation and recompose the result to NFC.
fn standardize_punctuation(chars: impl Iterator<Item = char>) -> String {
    let mut out = String::new();
    for ch in chars {
        match ch {
            '&' => out.push_str(" and "),
            // Joined, not split: "s.a." -> "sa", "mcdonald's" -> "mcdonalds"
            '.' | '\'' | '\u{2019}' | '`' => {}
            c if c.is_alphanumeric() || is_combining_mark(c) => out.push(c),
            _ => out.push(' '),
        }
    }
    // Dropped punctuation can leave a base and its mark adjacent.
    out.as_str().nfc().collect()
}

fn validate_suffix(suffix: &str) -> Result<()> {
    if suffix.is_empty() {
        return Err(NormalizerError::InvalidSuffix {
            suffix: suffix.to_string(),
            reason: "must not be empty",
        });
    }
    if suffix.chars().any(char::is_uppercase) {
        return Err(NormalizerError::InvalidSuffix {
            suffix: suffix.to_string(),
            reason: "must be lowercase",
        });
    }
    if !suffix.chars().all(char::is_alphanumeric) {
        return Err(NormalizerError::InvalidSuffix {
            suffix: suffix.to_string(),
            reason: "must be a single alphanumeric token",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_single_suffix() {
        assert_eq!(normalize_name("Apple Inc"), "apple");
        assert_eq!(normalize_name("Apple Inc."), "apple");
        assert_eq!(normalize_name("BHP Ltd"), "bhp");
        assert_eq!(normalize_name("BHP Limited"), "bhp");
        assert_eq!(normalize_name("Microsoft Corporation"), "microsoft");
    }

    #[test]
    fn test_strips_stacked_suffixes() {
        assert_eq!(normalize_name("BHP Group Ltd"), "bhp");
        assert_eq!(normalize_name("Acme Holdings Pty. Ltd."), "acme");
        assert_eq!(normalize_name("Acme Group"), "acme");
    }

    #[test]
    fn test_keeps_mid_name_suffix_tokens() {
        assert_eq!(normalize_name("The Co-operative Group"), "the co operative");
        assert_eq!(normalize_name("Group Lotus plc"), "group lotus");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(normalize_name("APPLE"), "apple");
        assert_eq!(normalize_name("Apple"), "apple");
        assert_eq!(normalize_name("apple"), "apple");
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(normalize_name("Tesla, Inc."), "tesla");
        assert_eq!(normalize_name("AT&T"), "at and t");
        assert_eq!(normalize_name("Coca-Cola"), "coca cola");
        assert_eq!(normalize_name("McDonald's Corp"), "mcdonalds");
        assert_eq!(normalize_name("Nestlé S.A."), "nestlé");
    }

    #[test]
    fn test_unicode_forms_share_a_key() {
        let composed = "Soci\u{e9}t\u{e9} G\u{e9}n\u{e9}rale SA";
        let decomposed = "Socie\u{301}te\u{301} Ge\u{301}ne\u{301}rale SA";
        assert_eq!(normalize_name(decomposed), "soci\u{e9}t\u{e9} g\u{e9}n\u{e9}rale");
        assert_eq!(normalize_name(decomposed), normalize_name(composed));
    }

    #[test]
    fn test_compatibility_forms_fold() {
        assert_eq!(normalize_name("\u{ff21}\u{ff50}\u{ff50}\u{ff4c}\u{ff45} Inc."), "apple");
        assert_eq!(normalize_name("\u{fb01}nancial Group"), "financial");
        assert_eq!(normalize_name("Acme \u{130}nc"), "acme");
        assert_eq!(normalize_name("Acme I\u{307}nc"), "acme");
    }

    #[test]
    fn test_combining_marks_join_words() {
        assert_eq!(normalize_name("Ta\u{302}\u{323}m Co"), "t\u{1ead}m");
        // No precomposed form: the mark stays attached to its base.
        assert_eq!(normalize_name("q\u{307}uark"), "q\u{307}uark");
        // Dropping punctuation between a base and its mark recomposes them.
        assert_eq!(normalize_name("e.\u{301}"), "\u{e9}");
    }

    #[test]
    fn test_suffix_only_is_empty() {
        assert_eq!(normalize_name("Inc."), "");
        assert_eq!(normalize_name("Group Ltd"), "");
        assert_eq!(normalize_name("   "), "");
        assert_eq!(normalize_name(""), "");
        assert_eq!(normalize_name("...,,&"), "and");
    }

    #[test]
    fn test_bounded_suffix_strips() {
        let config = NormalizerConfig::default().with_max_suffix_strips(Some(1));
        let normalizer = Normalizer::new(&config).unwrap();
        assert_eq!(normalizer.normalize("BHP Group Ltd"), "bhp group");
    }

    #[test]
    fn test_custom_suffixes() {
        let config = NormalizerConfig::default().with_legal_suffixes(["ltd"]);
        let normalizer = Normalizer::new(&config).unwrap();
        assert_eq!(normalizer.normalize("Acme Group Ltd"), "acme group");
        assert!(normalizer.is_legal_suffix("ltd"));
        assert!(!normalizer.is_legal_suffix("group"));
    }

    #[test]
    fn test_rejects_invalid_suffix() {
        for bad in ["", "Ltd", "s.a.", "pty ltd"] {
            let config = NormalizerConfig::default().with_legal_suffixes([bad]);
            assert!(
                matches!(
                    Normalizer::new(&config),
                    Err(NormalizerError::InvalidSuffix { .. })
                ),
                "suffix {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_default_matches_default_config() {
        let built = Normalizer::new(&NormalizerConfig::default()).unwrap();
        assert_eq!(&built, default_normalizer());
    }

    #[test]
    fn test_tokens() {
        let key = normalize_name("Rio Tinto plc");
        assert_eq!(tokens(&key).collect::<Vec<_>>(), vec!["rio", "tinto"]);
    }
}
