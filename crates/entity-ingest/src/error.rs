//! Error types for reference data loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading reference company data.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Source file not found.
    #[error("data file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// Malformed CSV.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Malformed JSON or JSON Lines.
    #[error("failed to parse JSON {path}: {message}")]
    JsonParse { path: PathBuf, message: String },

    /// A required column (or object key) is absent.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: &'static str, path: PathBuf },

    /// File extension is not one of csv, json, jsonl, ndjson.
    #[error("unsupported data format '{extension}' for {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    // === Content Errors ===
    /// The source produced no usable records.
    #[error("no usable company records in {path}")]
    EmptySource { path: PathBuf },
}

impl IngestError {
    /// Map an I/O error on `path`, distinguishing a missing file.
    pub(crate) fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::FileRead { path, source: err }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/data/companies.csv"),
        };
        assert_eq!(err.to_string(), "data file not found: /data/companies.csv");

        let err = IngestError::MissingColumn {
            column: "country",
            path: PathBuf::from("x.csv"),
        };
        assert_eq!(err.to_string(), "required column 'country' not found in x.csv");
    }

    #[test]
    fn test_io_not_found_maps_to_file_not_found() {
        let err = IngestError::io(
            "missing.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, IngestError::FileNotFound { .. }));

        let err = IngestError::io(
            "locked.csv",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, IngestError::FileRead { .. }));
    }
}
