//! Reference data loading.
//!
//! Reads company lists from CSV, JSON arrays and JSON Lines into
//! [`RawCompany`](entity_model::RawCompany) values ready to be indexed.
//!
//! # Features
//!
//! - **Header aliases**: `company_name`, `iso2`, `lei_code` and friends map onto
//!   the canonical name/country/lei/source fields, case-insensitively
//! - **Row validation**: rows without a name or country are skipped and counted
//! - **LEI validation**: ISO 17442 check digits; invalid codes are dropped, the
//!   record is kept
//! - **Provenance**: rows without a source are tagged with the file stem
//!
//! # Example
//!
//! ```ignore
//! use entity_ingest::load_paths;
//!
//! let loaded = load_paths(["data/companies.csv", "extra/gleif.jsonl"])?;
//! println!("{} records, {} skipped", loaded.report.records, loaded.report.skipped_rows);
//! ```

mod columns;
mod delimited;
mod error;
mod json;
mod lei;
mod loader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Loading ===
pub use loader::{LoadReport, Loaded, SourceFormat, load_path, load_paths};

// === Identifiers ===
pub use lei::{LEI_LEN, is_valid_lei, normalize_lei};

// === Column Aliases ===
pub use columns::Field;
