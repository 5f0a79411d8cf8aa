//! The entity identity service.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use entity_ingest::load_paths;
use entity_match::{IndexStats, Resolver};
use entity_model::{CompanyRecord, RawCompany, ResolutionResult};
use entity_normalization::Normalizer;
use serde::Serialize;
use tracing::warn;

use crate::config::AppConfig;
use crate::database::{Database, Snapshot};
use crate::error::Result;

/// Filters for [`EntityIdentity::list_companies`]. All are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Restrict to one country (case-insensitive code).
    pub country: Option<String>,
    /// Case-insensitive substring of the display or normalized name.
    pub search: Option<String>,
    /// Maximum number of records returned.
    pub limit: Option<usize>,
}

impl ListQuery {
    #[must_use]
    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Counts and provenance for the current snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatabaseStats {
    #[serde(flatten)]
    pub index: IndexStats,
    /// Per-country record counts, sorted by code.
    pub by_country: Vec<(String, usize)>,
    pub fingerprint: String,
    pub loaded_at: DateTime<Utc>,
    pub sources: Vec<PathBuf>,
    pub skipped_rows: usize,
    pub invalid_leis: usize,
}

/// Resolves company names against a reloadable reference snapshot.
///
/// Cheap to share across threads; every call works on the snapshot that
/// was current when it started.
#[derive(Debug)]
pub struct EntityIdentity {
    resolver: Resolver,
    database: Database,
}

impl EntityIdentity {
    /// Build the service from `config`, loading its data paths.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EntityError`] if the configuration is invalid or
    /// the reference data fails to load.
    pub fn load(config: &AppConfig) -> Result<Self> {
        let resolver = config.build_resolver()?;
        let snapshot = load_snapshot(&config.data_paths(), resolver.normalizer())?;
        Ok(Self {
            database: Database::new(snapshot),
            resolver,
        })
    }

    /// Build the service over in-memory records.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EntityError`] if the configuration is invalid.
    pub fn with_records(
        config: &AppConfig,
        companies: impl IntoIterator<Item = RawCompany>,
    ) -> Result<Self> {
        let resolver = config.build_resolver()?;
        let snapshot = Snapshot::build(companies, resolver.normalizer());
        Ok(Self {
            database: Database::new(snapshot),
            resolver,
        })
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn normalizer(&self) -> &Normalizer {
        self.resolver.normalizer()
    }

    /// Normalize a name with this service's normalizer.
    pub fn normalize_name(&self, raw: &str) -> String {
        self.resolver.normalizer().normalize(raw)
    }

    /// Records matching `query`, in database order.
    pub fn list_companies(&self, query: &ListQuery) -> Vec<Arc<CompanyRecord>> {
        let snapshot = self.database.snapshot();
        snapshot.index().search(
            query.search.as_deref().unwrap_or_default(),
            query.country.as_deref(),
            query.limit,
        )
    }

    /// The accepted record for `raw`, if any.
    pub fn match_company(&self, raw: &str, country: Option<&str>) -> Option<Arc<CompanyRecord>> {
        self.resolve_company(raw, country).final_match
    }

    /// Full resolution of `raw`, with every scored candidate.
    pub fn resolve_company(&self, raw: &str, country: Option<&str>) -> ResolutionResult {
        let snapshot = self.database.snapshot();
        self.resolver.resolve(snapshot.index(), raw, country)
    }

    /// Load `paths` and publish them as the new snapshot.
    ///
    /// The replacement is built before the swap; on failure the current
    /// snapshot keeps serving.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EntityError::Load`] if any file fails to load.
    pub fn reload_from<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Arc<Snapshot>> {
        let paths: Vec<PathBuf> = paths.iter().map(|p| p.as_ref().to_path_buf()).collect();
        match load_snapshot(&paths, self.resolver.normalizer()) {
            Ok(snapshot) => Ok(self.database.publish(snapshot)),
            Err(err) => {
                warn!(error = %err, "reload failed; keeping current snapshot");
                Err(err)
            }
        }
    }

    /// Publish in-memory records as the new snapshot.
    pub fn reload_with(&self, companies: impl IntoIterator<Item = RawCompany>) -> Arc<Snapshot> {
        self.database
            .publish(Snapshot::build(companies, self.resolver.normalizer()))
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.database.snapshot()
    }

    pub fn stats(&self) -> DatabaseStats {
        let snapshot = self.database.snapshot();
        let index = snapshot.index();
        DatabaseStats {
            index: index.stats(),
            by_country: index
                .countries()
                .map(|(code, count)| (code.to_string(), count))
                .collect(),
            fingerprint: snapshot.fingerprint().to_string(),
            loaded_at: snapshot.loaded_at(),
            sources: snapshot.sources().to_vec(),
            skipped_rows: snapshot.report().skipped_rows,
            invalid_leis: snapshot.report().invalid_leis,
        }
    }
}

fn load_snapshot(paths: &[PathBuf], normalizer: &Normalizer) -> Result<Snapshot> {
    let loaded = load_paths(paths)?;
    Ok(Snapshot::build(loaded.companies, normalizer).with_report(loaded.report))
}
