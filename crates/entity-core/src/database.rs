//! Published reference snapshots.
//!
//! A [`Snapshot`] is the immutable product of one load: the indexed records
//! plus where they came from. The [`Database`] publishes one snapshot at a
//! time; readers clone the current `Arc` and work lock-free from there, and
//! a reload swaps in a fully built replacement.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use entity_ingest::LoadReport;
use entity_match::ReferenceIndex;
use entity_model::{CompanyRecord, RawCompany};
use entity_normalization::Normalizer;
use sha2::{Digest, Sha256};
use tracing::info;

/// One immutable generation of the reference database.
#[derive(Debug)]
pub struct Snapshot {
    index: ReferenceIndex,
    fingerprint: String,
    loaded_at: DateTime<Utc>,
    report: LoadReport,
}

impl Snapshot {
    /// Normalize and index `companies`. Input order becomes database order.
    pub fn build(companies: impl IntoIterator<Item = RawCompany>, normalizer: &Normalizer) -> Self {
        let index = ReferenceIndex::build(
            companies
                .into_iter()
                .map(|raw| CompanyRecord::new(raw, normalizer)),
        );
        let fingerprint = fingerprint(&index);
        let report = LoadReport {
            records: index.len(),
            ..LoadReport::default()
        };
        Self {
            index,
            fingerprint,
            loaded_at: Utc::now(),
            report,
        }
    }

    /// Attach the load report of the files this snapshot was built from.
    #[must_use]
    pub fn with_report(mut self, report: LoadReport) -> Self {
        self.report = report;
        self
    }

    pub fn index(&self) -> &ReferenceIndex {
        &self.index
    }

    /// SHA-256 over the records' content, in database order.
    ///
    /// Two snapshots with equal fingerprints hold the same records.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Files the snapshot was loaded from; empty for in-memory builds.
    pub fn sources(&self) -> &[PathBuf] {
        &self.report.files
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

fn fingerprint(index: &ReferenceIndex) -> String {
    let mut hasher = Sha256::new();
    for record in index.all() {
        for field in [
            record.name(),
            record.country(),
            record.lei().unwrap_or_default(),
            record.source().unwrap_or_default(),
        ] {
            hasher.update(field.as_bytes());
            hasher.update([0x1f]);
        }
        hasher.update([0x1e]);
    }
    hex::encode(hasher.finalize())
}

/// Holder of the currently published [`Snapshot`].
#[derive(Debug)]
pub struct Database {
    current: RwLock<Arc<Snapshot>>,
}

impl Database {
    pub fn new(snapshot: Snapshot) -> Self {
        log_published(&snapshot);
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// The current snapshot. It stays valid for as long as the caller holds
    /// it, even across reloads.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Publish `snapshot`, replacing the current one. Returns the new snapshot.
    pub fn publish(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        log_published(&snapshot);
        let snapshot = Arc::new(snapshot);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::clone(&snapshot);
        snapshot
    }
}

fn log_published(snapshot: &Snapshot) {
    info!(
        records = snapshot.len(),
        sources = snapshot.sources().len(),
        fingerprint = &snapshot.fingerprint()[..12],
        "published reference snapshot"
    );
}
