//! Organization name normalization.
//!
//! Turns a free-text company name into the comparison key used everywhere
//! else in the workspace (`name_norm`). The pipeline runs in a fixed order:
//!
//! 1. Unicode NFKC, then lowercase (Unicode-aware)
//! 2. Standardize punctuation (`&` becomes `and`, periods and apostrophes
//!    are dropped, every other separator becomes a space)
//! 3. Collapse whitespace
//! 4. Strip trailing legal-form suffixes (`inc`, `ltd`, `group`, ...)
//!    until the last token is not a suffix
//!
//! NFKC folds fullwidth and compatibility forms (`Ａｐｐｌｅ`, `ﬁ`) and
//! composes decomposed accents, so every Unicode spelling of a name gets
//! the same key. Accents are kept: `Société` and `Societe` are different
//! keys. Combining marks join their base character rather than splitting
//! the word, and the key is recomposed to NFC after punctuation is
//! dropped.
//!
//! Normalization is pure and total: any input yields a string, possibly
//! empty when the name consisted only of suffixes or punctuation.
//!
//! # Example
//!
//! ```
//! use entity_normalization::normalize_name;
//!
//! assert_eq!(normalize_name("Apple Inc."), "apple");
//! assert_eq!(normalize_name("BHP Group Ltd"), "bhp");
//! assert_eq!(normalize_name("Tesla, Inc."), "tesla");
//! assert_eq!(normalize_name("Socie\u{301}te\u{301} Ge\u{301}ne\u{301}rale SA"), "société générale");
//! ```

#![deny(unsafe_code)]

mod config;
mod error;
mod normalizer;

pub use config::{DEFAULT_LEGAL_SUFFIXES, NormalizerConfig};
pub use error::{NormalizerError, Result};
pub use normalizer::{Normalizer, default_normalizer, normalize_name, tokens};
