//! Data model for entity resolution.
//!
//! - [`RawCompany`]: a reference row as produced by a loader, before normalization
//! - [`CompanyRecord`]: an immutable reference record with its derived `name_norm`
//! - [`MatchCandidate`]: a scored candidate produced by one resolution call
//! - [`ResolutionResult`]: the ranked candidates plus the resolver's [`Decision`]
//!
//! Records are shared as `Arc<CompanyRecord>`; results reference the
//! records of the snapshot they were resolved against without owning them.

#![deny(unsafe_code)]

pub mod record;
pub mod resolution;

pub use record::{CompanyRecord, RawCompany, normalize_country};
pub use resolution::{
    Decision, MatchCandidate, ResolutionResult, ScoreComponent, explain_components,
};
