//! Company name resolution against an immutable reference index.
//!
//! The crate is organized leaf-first:
//!
//! - [`index`]: the [`ReferenceIndex`] built once from loaded records
//! - [`blocking`]: the [`CandidateGenerator`] that bounds how many records are scored
//! - [`score`]: the [`Scorer`] combining string similarity with country and LEI signals
//! - [`resolver`]: the [`Resolver`] ranking candidates and deciding accepted/ambiguous/rejected
//!
//! # Example
//!
//! ```ignore
//! use entity_match::{ReferenceIndex, Resolver};
//!
//! let index = ReferenceIndex::build(records);
//! let resolver = Resolver::default();
//! let result = resolver.resolve(&index, "Apple Inc", Some("US"));
//! assert!(result.is_accepted());
//! ```

#![deny(unsafe_code)]

pub mod blocking;
pub mod config;
pub mod error;
pub mod index;
pub mod resolver;
pub mod score;

pub use blocking::{CandidateGenerator, is_significant_token};
pub use config::{BlockingConfig, ResolverConfig, ScoringWeights};
pub use error::ConfigError;
pub use index::{IndexStats, ReferenceIndex};
pub use resolver::Resolver;
pub use score::{CandidateScore, Scorer, token_set_ratio};
