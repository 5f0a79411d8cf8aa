//! Entity identity service.
//!
//! Ties the pieces together: configuration, reference data loading, the
//! published snapshot and the resolution API.
//!
//! # Example
//!
//! ```ignore
//! use entity_core::{AppConfig, EntityIdentity, ListQuery};
//!
//! let service = EntityIdentity::load(&AppConfig::default())?;
//!
//! let result = service.resolve_company("Apple Inc", Some("US"));
//! println!("{} -> {:?}", result.decision, result.final_record().map(|r| r.name()));
//!
//! let us = service.list_companies(&ListQuery::default().country("US").limit(10));
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod service;

pub use config::{AppConfig, DATA_ENV_VAR, DataConfig, bundled_data_path, default_data_paths};
pub use database::{Database, Snapshot};
pub use error::{EntityError, Result};
pub use service::{DatabaseStats, EntityIdentity, ListQuery};

// Types that appear in the service API.
pub use entity_ingest::LoadReport;
pub use entity_match::{IndexStats, Resolver, ResolverConfig};
pub use entity_model::{CompanyRecord, Decision, MatchCandidate, RawCompany, ResolutionResult};
pub use entity_normalization::NormalizerConfig;
/// Normalize with the built-in suffix list.
///
/// Ignores any `[normalizer]` configuration. For keys that agree with a
/// configured service use [`EntityIdentity::normalize_name`].
pub use entity_normalization::normalize_name;
